//! Test-email command implementation

use super::{display_or_unset, outbox_delivery};
use crate::config::load_settings;
use anyhow::{Context, Result};
use readpace_core::delivery::Delivery;
use std::path::Path;

/// Print the delivery configuration and check that it can deliver
pub fn test_email(data_dir: &Path) -> Result<()> {
    let settings = load_settings(data_dir)?;
    let delivery = outbox_delivery(data_dir, &settings);

    println!("Testing delivery configuration...");
    println!("Delivery:        {}", delivery.name());
    println!("Outbox:          {}", delivery.outbox().display());
    println!("Sender email:    {}", display_or_unset(&settings.sender_email));
    println!("Recipient email: {}", display_or_unset(&settings.user_email));
    println!("Email enabled:   {}", settings.enable_email);

    if !settings.enable_email {
        println!("Email is disabled. Set enable_email to true in settings to test it.");
        return Ok(());
    }

    delivery
        .verify()
        .context("Delivery configuration needs to be fixed")?;
    println!("Delivery configuration is working!");
    Ok(())
}
