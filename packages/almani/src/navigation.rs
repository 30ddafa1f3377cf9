//! 顶层页面路由

/// 顶层页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Learn,
    Conversation,
    Dictionary,
    Profile,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Learn,
        Route::Conversation,
        Route::Dictionary,
        Route::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Learn => "/learn",
            Self::Conversation => "/conversation",
            Self::Dictionary => "/dictionary",
            Self::Profile => "/profile",
        }
    }

    /// 解析路径，未知路径重定向到首页
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or_else(|| {
                tracing::debug!(path, "unknown route, redirecting home");
                Self::Home
            })
    }
}
