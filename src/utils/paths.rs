use std::path::PathBuf;

pub fn medimatch_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("medimatch"))
}
