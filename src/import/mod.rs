mod csv_import;

pub(crate) use csv_import::{export_csv, import_file};
