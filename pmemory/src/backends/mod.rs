pub(crate) mod json_file;
