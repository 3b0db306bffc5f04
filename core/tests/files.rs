//! Reading snapshot and volume files from disk.

use std::{fs, io::Write, path::Path};

use approx::assert_abs_diff_eq;
use hydro_toolbox_core::{
    formats::{
        grid,
        read_ext::Endian,
        volume::{self, LengthCheck},
    },
    AnalysisConfig, GridSnapshot, TemperatureEvolution, VolumeDescriptor, VolumeDims,
    VolumeFormat, VolumeProfile,
};

fn write_volume(path: &Path, values: &[f32]) {
    let mut file = fs::File::create(path).expect("create volume file");
    for v in values {
        file.write_all(&v.to_le_bytes()).expect("write value");
    }
}

#[test]
fn grid_snapshot_from_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("u_field_1.dat");

    let mut body = String::from("neta 1 nx 3 ny 2 deta 0.1 dx 0.2 dy 0.2\n");
    for i in 0..3 {
        for j in 0..2 {
            body.push_str(&format!("{i} {j} 0 {}\n", (i * 2 + j + 1) as f64));
        }
        body.push('\n');
    }
    fs::write(&path, body).expect("write grid file");

    let grid = GridSnapshot::read(&path).expect("read grid");
    assert_eq!((grid.nx(), grid.ny()), (3, 2));
    assert_eq!(grid.dx(), 0.2);
    assert_abs_diff_eq!(grid.values().sum(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(grid.values()[[2, 1]], 6.0 / 21.0, epsilon = 1e-12);

    let stats = grid.stats().expect("non-empty grid");
    assert_abs_diff_eq!(stats.max, 6.0 / 21.0, epsilon = 1e-12);
}

#[test]
fn missing_grid_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = GridSnapshot::read(dir.path().join("missing.dat")).unwrap_err();
    assert!(matches!(err, grid::Error::Io(_)));
}

#[test]
fn exact_length_check_rejects_any_other_size() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("evolution_xyeta.dat");
    let dims = VolumeDims::new(2, 2, 2, 1);
    let exact = VolumeFormat {
        byte_order: Endian::Little,
        length_check: LengthCheck::Exact,
    };

    for count in [7usize, 8, 9] {
        write_volume(&path, &vec![0.2; count]);
        let result = VolumeDescriptor::new(&path, dims).with_format(exact).load();
        if count == 8 {
            assert!(result.is_ok(), "{count} values should load");
        } else {
            assert!(
                matches!(result, Err(volume::Error::ShapeMismatch { .. })),
                "{count} values should be rejected"
            );
        }
    }
}

#[test]
fn temperature_evolution_from_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("evolution_xyeta.dat");

    // 3 frames, 2 eta bins, 2x2 cells, 2 components; component 1 is noise
    let dims = VolumeDims::new(3, 2, 2, 2);
    let mut values = Vec::new();
    for tau in 0..3 {
        for eta in 0..2 {
            for cell in 0..4 {
                let temperature = if eta == 1 {
                    0.1 + 0.1 * (tau + cell) as f32
                } else {
                    -1.0
                };
                values.push(temperature);
                values.push(99.0);
            }
        }
    }
    write_volume(&path, &values);

    let volume = VolumeProfile::read(&path, dims).expect("read volume");
    let config = AnalysisConfig {
        eta: 5.0,
        ..Default::default()
    };
    let slice = volume
        .slice_at_eta(config.eta, &config.eta_range)
        .expect("eta in range");
    assert_eq!(slice.eta_index(), 1);

    let evolution = TemperatureEvolution::from_slice(&slice, &config).expect("evolution");
    assert_eq!(evolution.len(), 3);
    // frame 0: 0.1 0.2 0.3 0.4, the first is below the cutoff
    assert_abs_diff_eq!(evolution.average[0], 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(evolution.maximum[0], 0.4, epsilon = 1e-6);
    assert_abs_diff_eq!(evolution.minimum[0], 0.16, epsilon = 1e-6);
    // frame 2: 0.3 0.4 0.5 0.6
    assert_abs_diff_eq!(evolution.average[2], 0.45, epsilon = 1e-6);
    assert_abs_diff_eq!(evolution.minimum[2], 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(evolution.tau[2], 0.8, epsilon = 1e-12);
}
