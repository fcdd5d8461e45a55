pub mod csv_file;
pub mod excel_write;
pub mod source;
