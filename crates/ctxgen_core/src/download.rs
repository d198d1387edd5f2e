/// Text after the last `/` of a server-side file path, or the whole path when
/// it has no separator. No escaping or normalization is applied.
pub fn final_segment(file_path: &str) -> &str {
    file_path.rsplit('/').next().unwrap_or(file_path)
}

/// Download location for a generated file: `{api_base}/download/{final_segment}`.
pub fn download_location(api_base: &str, file_path: &str) -> String {
    format!("{api_base}/download/{}", final_segment(file_path))
}
