use std::sync::LazyLock;

use crate::build_info::BUILD_INFO;

/// Version reported by `--version` and the startup log line.
///
/// `VERSION` at build time overrides the crate version, e.g. for image tags.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    let release = option_env!("IMAGE_VERSION")
        .filter(|v| !v.is_empty())
        .unwrap_or(env!("CARGO_PKG_VERSION"));
    match BUILD_INFO.commit_sha1 {
        Some(sha) => format!(
            "{release}-{}{}",
            &sha[..sha.len().min(8)],
            if BUILD_INFO.is_dirty() { "-dirty" } else { "" }
        ),
        None => release.to_string(),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_starts_with_release() {
        let release = option_env!("IMAGE_VERSION")
            .filter(|v| !v.is_empty())
            .unwrap_or(env!("CARGO_PKG_VERSION"));
        assert!(VERSION.starts_with(release));
    }
}
