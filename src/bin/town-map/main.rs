#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod constants;
mod coordinates;
mod modal;
mod overlays;
mod pointer;
mod ui;

use assets::{
    AssetLoadState, AssetSource, MAP_FILE, ZONES_FILE, load_and_decode_map, load_icon,
    load_zone_table,
};
use clap::Parser;
use constants::{APP_NAME, MOON_PHASE_KEY};
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use modal::ZoneModal;
use pointer::PointerAdapter;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::thread;
use town_map::{MoonPhase, ViewportController, ZoneTable};

/// Interactive town map with clickable zones.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Zone table to use instead of the built-in one (.ron or .json)
    #[arg(long, value_name = "PATH")]
    zones: Option<PathBuf>,

    /// SVG map to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Start with zone labels hidden
    #[arg(long)]
    no_labels: bool,
}

/// Main application state for the Town Map viewer.
pub struct TownMapApp {
    zones: ZoneTable,
    map_state: AssetLoadState,
    texture: Option<TextureHandle>,
    viewport: ViewportController,
    pointer: PointerAdapter,
    modal: ZoneModal,
    moon_phase: Option<MoonPhase>,
    show_labels: bool,
    hovered_zone: Option<String>,
    toasts: Toasts,
}

fn error_toast(text: String, seconds: f64) -> Toast {
    Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(seconds)
            .show_icon(true),
        ..Default::default()
    }
}

impl TownMapApp {
    fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let zone_source = AssetSource::resolve(args.zones, ZONES_FILE);
        let zones = match load_zone_table(&zone_source) {
            Ok(zones) => {
                log::info!("Loaded {} zones from {zone_source}", zones.len());
                zones
            }
            Err(err) => {
                log::warn!("Zone table unavailable, every zone will show the fallback text: {err}");
                toasts.add(error_toast(err.to_string(), 10.0));
                ZoneTable::default()
            }
        };

        // Parse and rasterise the map in a background thread
        let map_source = AssetSource::resolve(args.map, MAP_FILE);
        let (tx, rx) = mpsc::channel();
        let ctx = cc.egui_ctx.clone();
        thread::spawn(move || {
            let result = load_and_decode_map(&map_source);
            if let Ok(map) = &result {
                log::info!(
                    "Loaded map from {map_source}: {} zone regions, {}x{} px",
                    map.regions.len(),
                    map.width,
                    map.height
                );
            }
            let _ = tx.send(result);
            ctx.request_repaint();
        });

        Self {
            zones,
            map_state: AssetLoadState::Loading(rx),
            texture: None,
            viewport: ViewportController::new(),
            pointer: PointerAdapter::default(),
            modal: ZoneModal::default(),
            moon_phase: read_moon_phase(cc.storage),
            show_labels: !args.no_labels,
            hovered_zone: None,
            toasts,
        }
    }

    /// Polls the loading map and creates its texture once ready.
    fn poll_map(&mut self, ctx: &egui::Context) {
        let AssetLoadState::Loading(rx) = &self.map_state else {
            return;
        };

        let new_state = match rx.try_recv() {
            Ok(Ok(decoded)) => AssetLoadState::Ready(decoded),
            Ok(Err(err)) => {
                let msg = err.to_string();
                self.toasts.add(error_toast(msg.clone(), 8.0));
                AssetLoadState::Error(msg)
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                let msg = "map loader channel disconnected".to_owned();
                self.toasts.add(error_toast(msg.clone(), 8.0));
                AssetLoadState::Error(msg)
            }
            Err(mpsc::TryRecvError::Empty) => return,
        };

        if let AssetLoadState::Ready(decoded) = &new_state {
            let image = ColorImage::from_rgba_premultiplied(
                [decoded.width as usize, decoded.height as usize],
                &decoded.pixels,
            );
            self.texture = Some(ctx.load_texture("town-map", image, TextureOptions::LINEAR));
        }
        self.map_state = new_state;
    }

    /// Looks up a clicked zone and opens the modal with its details.
    fn open_zone(&mut self, id: &str) {
        let info = self.zones.lookup(id);
        log::debug!("Zone clicked: {id}");
        self.modal.show(id, &info.description, &info.contact);
    }
}

impl eframe::App for TownMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_map(ctx);

        self.show_status_bar(ctx);
        self.show_central_panel(ctx);
        self.modal.ui(ctx);

        // Show toasts
        self.toasts.show(ctx);
    }
}

/// Reads the externally stored moon phase. The value is never written back.
fn read_moon_phase(storage: Option<&dyn eframe::Storage>) -> Option<MoonPhase> {
    let stored = storage?.get_string(MOON_PHASE_KEY)?;
    match MoonPhase::from_stored(&stored) {
        Some(phase) => {
            log::info!("Moon phase {} ({})", phase.index(), phase.name());
            Some(phase)
        }
        None => {
            log::warn!("Ignoring invalid stored moon phase {stored:?}");
            None
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]);
    match load_icon(64) {
        Ok(icon) => {
            viewport = viewport.with_icon(Arc::new(egui::IconData {
                rgba: icon.pixels,
                width: icon.width,
                height: icon.height,
            }));
        }
        Err(err) => log::warn!("Failed to load window icon: {err}"),
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(TownMapApp::new(cc, args)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage(HashMap<String, String>);

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_owned(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_moon_phase_absent_without_storage() {
        assert_eq!(read_moon_phase(None), None);
        let storage = MemoryStorage::default();
        assert_eq!(read_moon_phase(Some(&storage as &dyn eframe::Storage)), None);
    }

    #[test]
    fn test_moon_phase_read_from_storage() {
        let mut storage = MemoryStorage::default();
        storage.0.insert(MOON_PHASE_KEY.to_owned(), "6".to_owned());
        assert_eq!(
            read_moon_phase(Some(&storage as &dyn eframe::Storage)),
            MoonPhase::new(6)
        );
    }

    #[test]
    fn test_invalid_moon_phase_is_ignored() {
        let mut storage = MemoryStorage::default();
        storage.0.insert(MOON_PHASE_KEY.to_owned(), "9".to_owned());
        assert_eq!(read_moon_phase(Some(&storage as &dyn eframe::Storage)), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["town-map", "--zones", "zones.json", "--no-labels"]);
        assert_eq!(args.zones, Some(PathBuf::from("zones.json")));
        assert_eq!(args.map, None);
        assert!(args.no_labels);
    }
}
