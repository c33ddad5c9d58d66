// frontdesk-client/examples/guest_flow.rs
// Search availability and optionally book the first room returned
//
// Run: cargo run --example guest_flow -- <check-in> <check-out> [room type] [name email phone]

use anyhow::{Context, bail};
use frontdesk_client::{
    AvailabilitySearch, BookingApi, BookingModal, ClientConfig, Clock, Dispatch, GuestInfo,
    NetworkHttpClient, RoomType, SystemClock,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <check-in> <check-out> [room type] [name email phone]", args[0]);
        println!("  Example: {} \"1 August 2025\" 2025-08-03 Double", args[0]);
        return Ok(());
    }
    let (check_in, check_out) = (args[1].as_str(), args[2].as_str());
    let category = args
        .get(3)
        .map(|raw| RoomType::parse(raw).with_context(|| format!("unknown room type: {raw}")))
        .transpose()?;

    let config = ClientConfig::from_env();
    let api = BookingApi::new(NetworkHttpClient::new(&config)?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let search = AvailabilitySearch::new(api.clone(), &config, clock.clone());

    println!("Searching {} for {check_in} .. {check_out}", config.base_url);
    let found = match search.search_typed(check_in, check_out, category).await {
        Dispatch::Completed(Ok(count)) => count,
        Dispatch::Completed(Err(err)) => {
            bail!("{}", search.message().unwrap_or_else(|| err.to_string()))
        }
        _ => bail!("search did not complete"),
    };
    println!("{found} room(s) available");

    let view = search.category_view();
    for card in view.iter().flat_map(|v| v.cards.iter()) {
        println!(
            "  #{:<4} Room {} ({}) {}",
            card.room_id, card.room_number, card.room_type, card.price_label
        );
    }

    let [name, email, phone] = match &args[4.min(args.len())..] {
        [name, email, phone, ..] => [name, email, phone],
        _ => return Ok(()),
    };
    let Some(room_id) = view.and_then(|v| v.cards.first().map(|c| c.room_id)) else {
        println!("Nothing to book");
        return Ok(());
    };

    let modal = BookingModal::new(api, &config, clock);
    modal.open(&search, room_id)?;
    modal.set_guest(GuestInfo::new(name.as_str(), email.as_str(), phone.as_str()));
    match modal.submit(&search).await {
        Dispatch::Completed(Ok(reference)) => println!("Booked room #{room_id}: {reference}"),
        Dispatch::Completed(Err(_)) => {
            bail!("{}", modal.error().unwrap_or_else(|| "Booking failed".into()))
        }
        _ => bail!("booking did not complete"),
    }
    Ok(())
}
