pub mod session;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Signup {
        username: String,
        password: SecretString,
        repeat_password: SecretString,
    },
    Login {
        username: String,
        password: SecretString,
    },
    Landing {
        url: String,
    },
    OAuth,
    Logout,
    Status,
}
