use taskpulse_api::Application;
use taskpulse_infra::{Config, TaskpulseContext};
use taskpulse_sdk::{TaskpulseSDK, User};

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Creates a `User` and returns it with an sdk acting on its behalf
    pub async fn create_user(&self, admin: &TaskpulseSDK, email: &str) -> (User, TaskpulseSDK) {
        self.create_user_at(admin, email, &self.address).await
    }

    /// Same as `create_user`, but the returned sdk talks to the given address
    pub async fn create_user_at(
        &self,
        admin: &TaskpulseSDK,
        email: &str,
        address: &str,
    ) -> (User, TaskpulseSDK) {
        let res = admin
            .user
            .create(email.into())
            .await
            .expect("Expected to create user");
        let sdk = TaskpulseSDK::with_session_token(address.to_string(), res.session_token);
        (res.user, sdk)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TaskpulseSDK) {
    let mut ctx = TaskpulseContext::create_inmemory();
    ctx.config.port = 0; // Random port

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let port = application.port();
    let address = format!("http://localhost:{}/api/v1", port);
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = TaskpulseSDK::new(address.clone(), config.admin_api_key.clone());
    let app = TestApp {
        config,
        address,
        port,
    };
    (app, sdk)
}
