//! Interactive console client for the contacts API.

use anyhow::Result;
use contactos_service::client::ContactsClient;
use contactos_service::error::ClientResult;
use contactos_service::models::NewContact;
use contactos_service::Config;
use dialoguer::{Input, Select};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const MENU_ITEMS: [&str; 7] = [
    "[1] List all contacts",
    "[2] Add a contact",
    "[3] Find a contact by name",
    "[4] Find a contact by phone",
    "[5] Find a contact by email",
    "[6] Delete a contact by id",
    "[7] Exit",
];

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::client_from_env()?;
    let client = ContactsClient::new(&config);
    println!("Contacts API at {}\n", config.api_base_url());

    loop {
        let selection = Select::new()
            .with_prompt("Choose an option")
            .items(&MENU_ITEMS)
            .default(0)
            .interact()?;

        match selection {
            0 => report("Contacts", client.list_contacts()),
            1 => {
                let contact = prompt_new_contact()?;
                report("Contact added", client.create_contact(&contact));
            }
            2 => {
                let name = prompt("Contact name")?;
                report("Contact found", client.find_by_name(&name));
            }
            3 => {
                let phone = prompt("Contact phone number")?;
                report("Contact found", client.find_by_phone(&phone));
            }
            4 => {
                let email = prompt("Contact email")?;
                report("Contact found", client.find_by_email(&email));
            }
            5 => {
                let id = prompt("Id of the contact to delete")?;
                report("Contact deleted", client.delete_contact(&id));
            }
            _ => break,
        }
        println!();
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn prompt_new_contact() -> Result<NewContact> {
    let name = prompt("Name")?;
    let phone = prompt("Phone")?;
    let email = prompt("Email")?;
    Ok(NewContact::new(name, phone, email))
}

/// Print the outcome of one request. Failures are shown and the menu carries on.
fn report<T: Serialize>(label: &str, result: ClientResult<T>) {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => println!("{}:\n{}", label, json),
            Err(e) => eprintln!("Could not render response: {}", e),
        },
        Err(e) => eprintln!("Request failed: {}", e),
    }
}
