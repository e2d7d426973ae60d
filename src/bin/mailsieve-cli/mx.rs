use anyhow::Result;
use mailsieve_lib::{MxRecords, MxTransport, Validator};

pub fn run<T: MxTransport>(validator: &Validator<T>, email: &str, format: &str) -> Result<()> {
    let records = validator.resolver().get_mx(email)?;
    match format {
        "json" | "ndjson" => print_json(&records),
        _ => {
            print_human(&records);
            Ok(())
        }
    }
}

fn print_human(records: &MxRecords) {
    if records.is_empty() {
        println!("no MX records");
        return;
    }
    for record in records.iter() {
        println!("{record}");
    }
}

#[cfg(feature = "with-serde")]
fn print_json(records: &MxRecords) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&records[..])?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn print_json(_: &MxRecords) -> Result<()> {
    anyhow::bail!("format=json nécessite la feature 'with-serde'")
}
