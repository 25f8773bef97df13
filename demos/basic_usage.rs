// demos/basic_usage.rs
// Run with: cargo run --example basic_usage

use rusty_ftp::{ConnectionConfig, TransferClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    // 1. Load connection settings (host, port, credentials, base path)
    let config = ConnectionConfig::load("ftp.toml")
        .map_err(|e| anyhow::anyhow!("configuration failed: {}", e))?;
    let upload_dir = config.file_path.clone();
    let client = TransferClient::new(config);

    // 2. Upload a local file under the configured partition directory
    println!("\n⬆️  Uploading file...");
    if client.upload_file("/local/path/report.xlsx", &upload_dir) {
        println!("✅ upload finished");
    } else {
        println!("❌ upload failed, see logs");
    }

    // 3. List the directory we just uploaded into
    let remote_dir = format!("{}{upload_dir}", client.config().base_path);
    println!("\n📂 Listing {remote_dir}...");
    for entry in client.list_dir(&remote_dir)? {
        println!("  - {} ({} bytes)", entry.name, entry.size);
    }

    // 4. Download the file back into /tmp
    println!("\n⬇️  Downloading file...");
    if client.download_file(&format!("{remote_dir}/report.xlsx"), "/tmp") {
        println!("✅ download finished");
    } else {
        println!("❌ download failed, see logs");
    }

    Ok(())
}
