use chromadoc::error::ContrastError;
use chromadoc::helper::chroma;
use chromadoc::{inverse_str, InverseOptions};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Print the contrasting colors for the colors given as arguments. Set
/// `RUST_LOG=chromadoc=trace` to watch the search.
fn main() -> Result<(), ContrastError> {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut colors: Vec<String> = std::env::args().skip(1).collect();
    if colors.is_empty() {
        colors = ["black", "white", "#336699", "hotpink", "rebeccapurple"]
            .map(String::from)
            .to_vec();
    }

    let options = InverseOptions::default();
    for color in &colors {
        let derived = inverse_str(color, None, None, &options)?;
        let given = inverse_str(color, Some("white"), Some("black"), &options)?;
        let display = |c: Option<chromadoc::Color>| c.map_or_else(String::new, |c| c.to_hex_format());

        println!(
            "{:<16} derived {:<10} white/black {:<10} helper {}",
            color,
            display(derived),
            display(given),
            chroma(&[color.as_str(), "inverse", "css"])
        );
    }

    Ok(())
}
