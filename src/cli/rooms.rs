use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::api::WebexClient;
use crate::config::Config;
use crate::types::Room;

use super::output::render_output;
use super::OutputFormat;

#[derive(Debug, Serialize, Tabled)]
struct RoomRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn rows(rooms: Vec<Room>) -> Vec<RoomRow> {
    rooms
        .into_iter()
        .map(|room| RoomRow {
            title: room.title,
            id: room.id,
        })
        .collect()
}

/// Render rooms, already sorted, in the given format
pub fn render_rooms(rooms: Vec<Room>, format: OutputFormat) -> Result<String> {
    render_output(&rows(rooms), format)
}

pub async fn execute(config: &Config, token: &str, format: OutputFormat) -> Result<()> {
    let client = WebexClient::new(config, token)?;
    let rooms = client
        .list_rooms()
        .await
        .context("Failed to list rooms")?
        .into_sorted();

    tracing::debug!("Fetched {} rooms", rooms.len());
    println!("{}", render_rooms(rooms, format)?);
    Ok(())
}
