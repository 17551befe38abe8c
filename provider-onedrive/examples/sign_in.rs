//! End-to-end demo: device-code sign-in followed by a root listing.
//!
//! ```sh
//! ONEDRIVE_CLIENT_ID=<application id> cargo run -p provider-onedrive --example sign_in
//! ```

use bridge_desktop::ReqwestHttpClient;
use bridge_traits::HttpClient;
use core_auth::{AuthConfig, DeviceCodeFlow, TokenManager};
use core_runtime::{init_logging, LoggingConfig};
use provider_onedrive::OneDriveClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default())?;

    let client_id = std::env::var("ONEDRIVE_CLIENT_ID")?;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    let config = AuthConfig::new(client_id);
    let tokens = DeviceCodeFlow::new(http.clone(), config.clone())
        .sign_in(|uri, code| {
            println!("Visit {uri} and enter the code {code}");
        })
        .await?;

    let auth = Arc::new(TokenManager::new(http.clone(), config, tokens));
    let drive = OneDriveClient::new(http, auth);

    for item in drive.list_children("").await? {
        let kind = if item.is_folder() { "dir " } else { "file" };
        println!("{kind}  {}", item.name);
    }

    Ok(())
}
