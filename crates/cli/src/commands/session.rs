//! Session commands: credential check and package history.

use super::{CliError, authenticate};

/// Verify credentials and print the seller's identity and approval state.
pub async fn login(email: &str, password: Option<&str>) -> Result<(), CliError> {
    let (_, session) = authenticate(email, password).await?;

    println!("Logged in as {} <{}>", session.name, session.email);
    println!("Seller id:       {}", session.id);
    println!("Approval status: {}", session.approve_status);
    if !session.is_approved() {
        println!("Note: most panel sections stay locked until the account is approved.");
    }
    Ok(())
}

/// Print the seller's package purchase history, newest first.
pub async fn packages(email: &str, password: Option<&str>) -> Result<(), CliError> {
    let (client, session) = authenticate(email, password).await?;
    let history = client.package_history(session.id).await?;

    if history.is_empty() {
        println!("No package history found");
        return Ok(());
    }

    println!(
        "{:<24} {:>10} {:>10} {:<12} {:<12} {:<12}",
        "Package", "Price", "Paid", "Start", "End", "Status"
    );
    for record in history {
        println!(
            "{:<24} {:>10} {:>10} {:<12} {:<12} {:<12}",
            record.package_name,
            record.package_price.to_string(),
            record.amount_paid.to_string(),
            record
                .package_start_date
                .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string()),
            record
                .package_end_date
                .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string()),
            record.status,
        );
    }
    Ok(())
}
