//! Locale command handler.

use std::sync::Arc;

use anyhow::Result;

use folio::{Locale, LocaleSwitcher};

use super::common::AppContext;
use super::LocaleAction;

/// Show or change the persisted locale.
pub(crate) fn cmd_locale(ctx: &AppContext, action: LocaleAction) -> Result<()> {
    let switcher = LocaleSwitcher::new(ctx.locale_store(), Arc::clone(&ctx.gateway));

    match action {
        LocaleAction::Show => {
            let current = switcher.current();
            for locale in Locale::ALL {
                let marker = if locale == current { "*" } else { " " };
                println!("{} {} ({})", marker, locale.code(), locale.display_name());
            }
        }
        LocaleAction::Set { locale } => {
            switcher.change(locale)?;
            println!("Language set to {} ({})", locale.code(), locale.display_name());
        }
    }
    Ok(())
}
