pub mod arr_meta;
