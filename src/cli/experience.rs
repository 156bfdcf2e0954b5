//! Experience tab command handler.

use anyhow::Result;

use folio::ExperienceTabs;

use super::common::AppContext;

/// Print the tab strip and the selected position's details.
pub(crate) async fn cmd_experience(
    ctx: &AppContext,
    tab: Option<usize>,
    company: Option<&str>,
) -> Result<()> {
    let mut tabs = ExperienceTabs::new(ctx.gateway.experiences().await?);
    if tabs.is_empty() {
        println!("No experience entries.");
        return Ok(());
    }

    if let Some(index) = tab {
        tabs.select(index)?;
    } else if let Some(company) = company {
        tabs.select_company(company)?;
    }

    for (i, label) in tabs.labels().enumerate() {
        let marker = if i == tabs.selected_index() { ">" } else { " " };
        println!("{} [{}] {}", marker, i, label);
    }

    let Some(selected) = tabs.selected() else {
        return Ok(());
    };
    println!();
    println!("{} @ {}", selected.position, selected.company);
    println!("{} · {}", selected.duration, selected.location);
    if !selected.website.is_empty() {
        println!("{}", selected.website);
    }
    for item in &selected.responsibilities {
        println!("  - {}", item);
    }
    Ok(())
}
