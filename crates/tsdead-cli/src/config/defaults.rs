use std::path::PathBuf;

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_ignore() -> Vec<String> {
    ["node_modules", ".git", "dist", "build"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_report_default_exports() -> bool {
    true
}
