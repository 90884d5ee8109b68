use crate::utils::Result;
use std::fs::File;
use std::io::BufWriter;

pub fn create_writer(output_prefix: &str, output_suffix: &str) -> Result<BufWriter<File>> {
    let output_path = format!("{}.{}", output_prefix, output_suffix);
    File::create(&output_path)
        .map(BufWriter::new)
        .map_err(|e| format!("Invalid output path {}: {}", output_path, e))
}
