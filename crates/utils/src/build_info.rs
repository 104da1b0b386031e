/// Git details captured by the build script
pub struct BuildInfo {
    pub commit_sha1: Option<&'static str>,
    /// Raw `VERGEN_GIT_DIRTY` value, `"true"` or `"false"`
    pub git_dirty: Option<&'static str>,
}

impl BuildInfo {
    pub fn is_dirty(&self) -> bool {
        self.git_dirty == Some("true")
    }
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    commit_sha1: option_env!("VERGEN_GIT_SHA"),
    git_dirty: option_env!("VERGEN_GIT_DIRTY"),
};
