//! Record fetch command handler.

use anyhow::Result;
use futures::future::join_all;

use folio::{DataGateway, Resource};

use super::common::AppContext;

/// Fetch `resources` concurrently and print them.
pub(crate) async fn cmd_fetch(
    ctx: &AppContext,
    resources: &[Resource],
    json: bool,
    stats: bool,
) -> Result<()> {
    let gateway = &ctx.gateway;
    let results = join_all(
        resources
            .iter()
            .map(|resource| gateway.resolve_resource(*resource)),
    )
    .await;

    let mut failures = 0usize;
    for (resource, result) in resources.iter().zip(results) {
        match result {
            Ok(value) if json => {
                let mut doc = serde_json::Map::new();
                doc.insert(resource.key().to_string(), (*value).clone());
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
            Ok(_) => print_summary(gateway, *resource).await?,
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", resource, e);
            }
        }
    }

    if stats {
        let s = gateway.stats();
        println!();
        println!(
            "Cache: {} cached, {} pending, {} hits, {} misses, {} joins (transport: {})",
            s.entries,
            s.pending,
            s.hits,
            s.misses,
            s.joins,
            gateway.transport_type()
        );
    }

    if failures > 0 {
        anyhow::bail!("{} of {} records could not be loaded", failures, resources.len());
    }
    Ok(())
}

/// Human-readable view of a record. Every call here is a cache hit.
async fn print_summary(gateway: &DataGateway, resource: Resource) -> Result<()> {
    match resource {
        Resource::PersonalInfo => {
            let info = gateway.personal_info().await?;
            println!("{} - {}", info.name, info.title);
            println!("  {}", info.subtitle);
            println!("  {} · {}", info.email, info.location);
        }
        Resource::AboutInfo => {
            let about = gateway.about_info().await?;
            for paragraph in &about.introduction {
                println!("{}", paragraph);
            }
            println!("Skills: {}", about.skills.join(", "));
        }
        Resource::Experiences => {
            println!("Experience:");
            for e in gateway.experiences().await? {
                println!("  {} - {} ({})", e.company, e.position, e.duration);
            }
        }
        Resource::Education => {
            println!("Education:");
            for e in gateway.education().await? {
                println!("  {} - {} ({})", e.school, e.degree, e.duration);
            }
        }
        Resource::Projects | Resource::FeaturedProjects => {
            let (heading, projects) = match resource {
                Resource::Projects => ("Projects", gateway.projects().await?),
                _ => ("Featured projects", gateway.featured_projects().await?),
            };
            println!("{}:", heading);
            for p in projects {
                let marker = if p.featured { "*" } else { " " };
                println!("  {} {} [{}]", marker, p.title, p.technologies.join(", "));
            }
        }
        Resource::SocialLinks => {
            println!("Social:");
            for link in gateway.social_links().await? {
                println!("  {:<10} {}", link.name, link.url);
            }
        }
        Resource::ContactInfo => {
            let info = gateway.contact_info().await?;
            println!("{} / {}", info.title, info.heading);
            println!("  {}", info.description);
            println!("  {}", info.email);
        }
    }
    Ok(())
}
