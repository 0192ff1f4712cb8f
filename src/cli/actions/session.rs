use crate::auth::{
    AuthFlowState, ConsoleNavigator, Credentials, FileStore, HttpAuthClient, NavigationGateway,
    OAuthRedirectHandler, SessionController, SignupForm,
};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Result, anyhow};

type CliController<N> = SessionController<HttpAuthClient, FileStore, N>;

/// Run one flow against the configured identity service and session store.
///
/// # Errors
/// Returns an error if the flow ends in `Failed` or the session store cannot
/// be used.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let controller = controller(globals, ConsoleNavigator)?;
    run(controller, action).await
}

fn controller<N: NavigationGateway>(
    globals: &GlobalArgs,
    navigator: N,
) -> Result<CliController<N>> {
    let config = globals.auth_config();
    let client = HttpAuthClient::new(config.clone())?;
    let store = FileStore::new(&globals.store_path);
    let oauth = OAuthRedirectHandler::from_config(&config);

    Ok(SessionController::new(client, store, navigator, oauth))
}

async fn run<N: NavigationGateway>(
    mut controller: CliController<N>,
    action: Action,
) -> Result<()> {
    match action {
        Action::Signup {
            username,
            password,
            repeat_password,
        } => {
            let form = SignupForm {
                username,
                password,
                repeat_password,
            };
            report(controller.submit_signup(form).await)
        }
        Action::Login { username, password } => {
            let credentials = Credentials { username, password };
            report(controller.submit_login(credentials).await?)
        }
        Action::Landing { url } => {
            controller.handle_landing(&url)?;
            Ok(())
        }
        Action::OAuth => {
            controller.begin_oauth();
            Ok(())
        }
        Action::Logout => {
            controller.logout()?;
            println!("Logged out");
            Ok(())
        }
        Action::Status => {
            let path = controller.store().path().display().to_string();
            if controller.restore()?.is_authenticated() {
                println!("Signed in (session stored in {path})");
            } else {
                println!("Not signed in");
            }
            Ok(())
        }
    }
}

fn report(state: &AuthFlowState) -> Result<()> {
    match state {
        AuthFlowState::Failed(message) => Err(anyhow!("{message}")),
        AuthFlowState::Idle {
            notice: Some(notice),
        } => {
            println!("{notice}");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::{SessionStore, SessionToken, routes};
    use secrecy::SecretString;
    use serde_json::json;
    use std::{
        net::TcpListener,
        path::PathBuf,
        sync::{Arc, Mutex},
    };
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Clone, Default)]
    struct Recorder {
        visits: Arc<Mutex<Vec<String>>>,
    }

    impl NavigationGateway for Recorder {
        fn go(&self, path: &str) {
            self.visits.lock().unwrap().push(path.to_string());
        }

        fn redirect_external(&self, url: &str) {
            self.visits.lock().unwrap().push(url.to_string());
        }
    }

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn globals(api_url: &str, dir: &TempDir) -> GlobalArgs {
        GlobalArgs::new(api_url.to_string(), dir.path().join("session.json"))
    }

    fn store_at(path: PathBuf) -> FileStore {
        FileStore::new(path)
    }

    #[test]
    fn report_turns_failure_into_error() {
        let err =
            report(&AuthFlowState::Failed("Passwords do not match".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(report(&AuthFlowState::default()).is_ok());
    }

    #[tokio::test]
    async fn login_persists_token_to_file() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "access_token": "abc123"
            })))
            .mount(&server)
            .await;

        let dir = TempDir::new()?;
        let globals = globals(&server.uri(), &dir);
        let recorder = Recorder::default();
        let controller = controller(&globals, recorder.clone())?;

        run(
            controller,
            Action::Login {
                username: "alice".to_string(),
                password: SecretString::from("pw".to_string()),
            },
        )
        .await?;

        assert_eq!(
            store_at(globals.store_path.clone()).load()?,
            SessionToken::new("abc123")
        );
        assert_eq!(*recorder.visits.lock().unwrap(), vec![routes::CHAT]);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_is_an_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let dir = TempDir::new()?;
        let globals = globals(&server.uri(), &dir);
        let controller = controller(&globals, Recorder::default())?;

        let err = run(
            controller,
            Action::Login {
                username: "alice".to_string(),
                password: SecretString::from("wrong".to_string()),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!globals.store_path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn landing_and_logout_round_trip_through_the_file() -> Result<()> {
        let dir = TempDir::new()?;
        let globals = globals("http://127.0.0.1:9", &dir);
        let recorder = Recorder::default();

        run(
            controller(&globals, recorder.clone())?,
            Action::Landing {
                url: "/auth/google/success?token=xyz".to_string(),
            },
        )
        .await?;
        assert_eq!(
            store_at(globals.store_path.clone()).load()?,
            SessionToken::new("xyz")
        );

        run(controller(&globals, recorder.clone())?, Action::Logout).await?;
        assert!(store_at(globals.store_path.clone()).load()?.is_none());

        assert_eq!(
            *recorder.visits.lock().unwrap(),
            vec![routes::CHAT, routes::HOME]
        );
        Ok(())
    }

    #[tokio::test]
    async fn google_prints_entry_url() -> Result<()> {
        let dir = TempDir::new()?;
        let globals = globals("https://id.example.com", &dir);
        let recorder = Recorder::default();

        run(controller(&globals, recorder.clone())?, Action::OAuth).await?;

        assert_eq!(
            *recorder.visits.lock().unwrap(),
            vec!["https://id.example.com/auth/google/login"]
        );
        Ok(())
    }
}
