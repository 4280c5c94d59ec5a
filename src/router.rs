//! Path based routing. Every page load enters exactly one route; moving
//! between pages is a full navigation, so there is no history handling.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Project(String),
    Agent(String),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["project", id] => Route::Project((*id).to_string()),
            ["agent", id] => Route::Agent((*id).to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Project(id) => format!("/project/{}", id),
            Route::Agent(id) => format!("/agent/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            Route::Project(id) => Some(id),
            _ => None,
        }
    }

    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Route::Agent(id) => Some(id),
            _ => None,
        }
    }
}

/// The route for the page currently loaded in the browser.
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Route::parse(&p))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip() {
        for route in [Route::Home, Route::Project("p1".into()), Route::Agent("665f0c".into())] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(Route::parse("/agent/a1/"), Route::Agent("a1".into()));
        assert_eq!(Route::parse("/project/p1?tab=agents"), Route::Project("p1".into()));
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/agent"), Route::NotFound("/agent".into()));
        assert_eq!(Route::parse("/settings/x"), Route::NotFound("/settings/x".into()));
    }
}
