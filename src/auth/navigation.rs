//! Navigation seam. The hosting shell owns routing; the auth flows only say
//! where to go next.

use tracing::info;

pub mod routes {
    pub const HOME: &str = "/";
    pub const CHAT: &str = "/chat";
    pub const OAUTH_LANDING: &str = "/auth/google/success";
}

pub trait NavigationGateway {
    /// Client-side route change within the application.
    fn go(&self, path: &str);

    /// Leaves the application, e.g. for the identity service's OAuth entry point.
    fn redirect_external(&self, url: &str);
}

/// Terminal stand-in for the browser router: prints where the user would be
/// sent next.
#[derive(Clone, Debug, Default)]
pub struct ConsoleNavigator;

impl NavigationGateway for ConsoleNavigator {
    fn go(&self, path: &str) {
        info!(path, "navigate");
        println!("-> {path}");
    }

    fn redirect_external(&self, url: &str) {
        info!(url, "redirect external");
        println!("Open this URL in your browser to continue:\n{url}");
    }
}
