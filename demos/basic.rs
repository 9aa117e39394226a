//! Basic example demonstrating the Security and Compliance Center client.
//!
//! Run with:
//! ```
//! SCC_AUTH_TOKEN=your-token cargo run --example basic
//! ```

use sccapi::{
    GetControlLibraryOptions, ListAttachmentsOptions, ListControlLibrariesOptions,
    ListProfilesOptions, Paginated, SccClient,
};

#[tokio::main]
async fn main() -> sccapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating SCC client...");
    let client = SccClient::from_env()?;
    println!("Connected to: {}", client.base_url());
    let account = client.account();

    // List first page of predefined control libraries
    println!("\n--- Listing Control Libraries (first page) ---");
    let options = ListControlLibrariesOptions {
        limit: Some(10),
        control_library_type: Some("predefined".to_string()),
        ..Default::default()
    };
    let page = account
        .list_control_libraries(&options)
        .await?
        .result
        .unwrap_or_default();
    println!(
        "Found {} libraries (total: {:?}, more: {})",
        page.control_libraries.as_ref().map_or(0, Vec::len),
        page.total_count(),
        page.has_more()
    );

    for library in page.control_libraries.iter().flatten() {
        println!(
            "  - {} ({})",
            library.control_library_name.as_deref().unwrap_or("unnamed"),
            library.id.as_deref().unwrap_or("-")
        );
    }

    // Get the first library with its controls
    if let Some(id) = page
        .control_libraries
        .iter()
        .flatten()
        .find_map(|l| l.id.clone())
    {
        println!("\n--- Control Library Details ---");
        let response = account
            .get_control_library(&GetControlLibraryOptions::new(id))
            .await?;
        if let Some(trace) = response.correlation_id() {
            println!("  Correlation: {}", trace);
        }
        if let Some(library) = response.result {
            println!("  Version: {:?}", library.control_library_version);
            println!("  Controls: {}", library.controls().count());
            for control in library.controls().take(5) {
                println!(
                    "    - {} [{}]",
                    control.control_name.as_deref().unwrap_or("?"),
                    control.control_category.as_deref().unwrap_or("uncategorized")
                );
            }
        }
    }

    // Walk all profiles and show their attachments
    println!("\n--- Profiles and Attachments ---");
    let mut options = ListProfilesOptions {
        limit: Some(50),
        ..Default::default()
    };
    loop {
        let page = account.list_profiles(&options).await?.result.unwrap_or_default();
        for profile in page.profiles.iter().flatten() {
            let Some(ref profile_id) = profile.id else {
                continue;
            };
            println!(
                "  {} ({} attachments)",
                profile.profile_name.as_deref().unwrap_or(profile_id),
                profile.attachments_count.unwrap_or(0)
            );
            if profile.attachments_count.unwrap_or(0) == 0 {
                continue;
            }
            let attachments = account
                .list_attachments(&ListAttachmentsOptions::new(profile_id.as_str()))
                .await?
                .result
                .unwrap_or_default();
            for attachment in attachments.attachments.iter().flatten() {
                println!(
                    "    - {} {} {}",
                    attachment.name.as_deref().unwrap_or("-"),
                    attachment.status.as_deref().unwrap_or("-"),
                    attachment.schedule.as_deref().unwrap_or("-")
                );
            }
        }
        match page.next_start() {
            Some(start) => options.start = Some(start),
            None => break,
        }
    }

    println!("\nDone!");
    Ok(())
}
