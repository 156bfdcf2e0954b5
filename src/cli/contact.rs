//! Contact form and newsletter command handlers.

use anyhow::Result;

use folio::models::ContactForm;
use folio::FolioError;

use super::common::AppContext;

/// Send the contact form and report the outcome.
pub(crate) async fn cmd_contact(ctx: &AppContext, form: ContactForm) -> Result<()> {
    match ctx.gateway.submit_contact_form(&form).await {
        Ok(receipt) => {
            println!("{}", receipt.message);
            Ok(())
        }
        // Already user-facing; print without the error chain.
        Err(FolioError::Submission(message)) => anyhow::bail!(message),
        Err(e) => Err(e.into()),
    }
}

/// Subscribe an address to the newsletter.
pub(crate) async fn cmd_subscribe(ctx: &AppContext, email: &str) -> Result<()> {
    let receipt = ctx.gateway.subscribe_newsletter(email).await?;
    println!("{}", receipt.message);
    Ok(())
}
