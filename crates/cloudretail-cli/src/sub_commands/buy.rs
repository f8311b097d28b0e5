use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use cloudretail::{
    catalog, CheckoutController, HttpOrderClient, OidcSessionProvider, PurchaseRequest, StoreUrl,
    SubmissionState,
};

#[derive(Args)]
pub struct BuySubCommand {
    /// Storefront url
    store_url: String,
    /// Product to purchase
    #[arg(default_value = catalog::FEATURED_PRODUCT_ID)]
    product_id: String,
    /// Quantity
    #[arg(default_value = "1")]
    quantity: u32,
    /// OpenID discovery document url of the identity backend
    #[arg(long)]
    openid_discovery: String,
    /// OAuth client id registered for this storefront
    #[arg(long)]
    client_id: String,
    /// Access token from an interactive sign in
    #[arg(long)]
    access_token: String,
    /// Refresh token, if the identity backend issued one
    #[arg(long)]
    refresh_token: Option<String>,
    /// Access token lifetime in seconds
    #[arg(long)]
    expires_in: Option<i64>,
}

pub async fn buy(sub_command_args: &BuySubCommand) -> Result<()> {
    let store_url = StoreUrl::from_str(&sub_command_args.store_url)?;

    let session = OidcSessionProvider::new(
        sub_command_args.openid_discovery.clone(),
        sub_command_args.client_id.clone(),
    );
    session
        .sign_in(
            sub_command_args.access_token.clone(),
            sub_command_args.refresh_token.clone(),
            sub_command_args.expires_in,
        )
        .await;

    let connector = HttpOrderClient::new(store_url);
    let controller = CheckoutController::new(Arc::new(session), Arc::new(connector));

    let request = PurchaseRequest::new(
        sub_command_args.product_id.clone(),
        sub_command_args.quantity,
    )?;

    println!(
        "Submitting order: {} x{}",
        request.product_id(),
        request.quantity()
    );

    match controller.submit(request).await {
        SubmissionState::Succeeded { order_id } => {
            println!("Order placed: {}", order_id);
            Ok(())
        }
        SubmissionState::Failed { message } => bail!(message),
        state => bail!("Purchase settled in unexpected state: {:?}", state),
    }
}
