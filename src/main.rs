//! Nova Strike entry point
//!
//! Handles platform-specific initialization and runs the mission loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use nova_strike::briefing::{HttpBriefingClient, briefing_or_fallback};
    use nova_strike::input::InputTracker;
    use nova_strike::renderer::{self, RenderState, TessellateOptions};
    use nova_strike::{Campaign, MissionOutcome, Screen, Session, Settings};

    /// Screen element ids and their base class
    const SCREENS: [(Screen, &str, &str); 5] = [
        (Screen::Menu, "menu-screen", "screen"),
        (Screen::Briefing, "briefing-screen", "screen"),
        (Screen::Playing, "hud", ""),
        (Screen::GameOver, "gameover-screen", "screen"),
        (Screen::Victory, "victory-screen", "screen"),
    ];

    /// Everything the page needs between callbacks
    struct App {
        campaign: Campaign,
        session: Option<Session>,
        input: InputTracker,
        settings: Settings,
        briefing: HttpBriefingClient,
        render_state: Option<RenderState>,
        /// Pending animation frame request
        raf_handle: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(settings: Settings, endpoint: String) -> Self {
            Self {
                campaign: Campaign::default(),
                session: None,
                input: InputTracker::new(settings.bindings.clone()),
                briefing: HttpBriefingClient::new(endpoint),
                settings,
                render_state: None,
                raf_handle: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one display frame. Returns the mission outcome once it is released.
        fn update(&mut self, time: f64) -> Option<MissionOutcome> {
            let snapshot = self.input.snapshot();
            let outcome = self
                .session
                .as_mut()
                .and_then(|session| session.frame(time, &snapshot));

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }

            outcome
        }

        /// Draw the current mission
        fn render(&mut self) {
            let Some(session) = self.session.as_ref() else {
                return;
            };
            let scene = renderer::build(session.state());
            let opts = TessellateOptions {
                segments: self.settings.quality.circle_segments(),
                glow: self.settings.effective_glow(),
            };
            let vertices = renderer::tessellate(&scene, opts);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let Some(session) = self.session.as_ref() else {
                return;
            };
            let state = session.state();
            let player = &state.player;

            set_value(document, "#hud-shield .hud-value", &format!("{:.0}", player.shield));
            set_value(document, "#hud-hull .hud-value", &format!("{:.0}", player.hull));
            set_value(
                document,
                "#hud-hostiles .hud-value",
                &state.enemies_remaining().to_string(),
            );
            set_value(
                document,
                "#hud-mission .hud-value",
                &self.campaign.mission_number().to_string(),
            );
            set_value(document, "#hud-fps .hud-value", &self.fps.to_string());

            set_bar(document, "#hud-shield .hud-bar", player.shield / player.max_shield);
            set_bar(document, "#hud-hull .hud-bar", player.hull / player.max_hull);

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("hud-message") {
                match state.message.as_ref() {
                    Some(message) => {
                        el.set_text_content(Some(&message.text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Show the active screen and fill in its text
        fn update_screens(&self, document: &Document) {
            for (screen, id, base) in SCREENS {
                if let Some(el) = document.get_element_by_id(id) {
                    let class = if screen == self.campaign.screen {
                        base.to_string()
                    } else {
                        format!("{base} hidden")
                    };
                    let _ = el.set_attribute("class", class.trim());
                }
            }

            let mission = self.campaign.mission_number().to_string();
            for id in ["briefing-mission", "gameover-mission"] {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&mission));
                }
            }

            if let Some(el) = document.get_element_by_id("briefing-text") {
                let text = self.campaign.briefing().unwrap_or("Establishing uplink...");
                el.set_text_content(Some(text));
            }

            if let Some(btn) = document.get_element_by_id("quality-btn") {
                let label = self.settings.quality.as_str().to_uppercase();
                btn.set_text_content(Some(&format!("QUALITY: {label}")));
            }

            if let Some(btn) = document.get_element_by_id("launch-btn") {
                if self.campaign.is_loading_briefing() {
                    let _ = btn.set_attribute("disabled", "");
                } else {
                    let _ = btn.remove_attribute("disabled");
                }
            }
        }

        /// Cancel the pending animation frame, if any
        fn cancel_frame(&mut self) {
            if let Some(handle) = self.raf_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }
    }

    fn set_value(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_bar(document: &Document, selector: &str, fraction: f32) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            let pct = (fraction.clamp(0.0, 1.0) * 100.0).round();
            let _ = el.set_attribute("style", &format!("width: {pct}%"));
        }
    }

    fn page_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Resolve a page-relative endpoint against the page origin
    fn absolute_endpoint(endpoint: &str) -> String {
        if !endpoint.starts_with('/') {
            return endpoint.to_string();
        }
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .map(|origin| format!("{origin}{endpoint}"))
            .unwrap_or_else(|| endpoint.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Nova Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let endpoint = absolute_endpoint(&settings.briefing_endpoint);
        let app = Rc::new(RefCell::new(App::new(settings, endpoint)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                match instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await
                {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer unavailable: {e}"),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {e}"),
                }
            }
            Err(e) => log::error!("Failed to create surface: {e}"),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(&document, app.clone());

        app.borrow().update_screens(&document);

        log::info!("Nova Strike ready");
        Ok(())
    }

    /// Fetch the briefing for the current level; the fallback covers failures
    fn request_briefing(app: Rc<RefCell<App>>) {
        let (client, level, enemy_types) = {
            let a = app.borrow();
            let enemy_types = a
                .campaign
                .current_level()
                .map(|level| level.enemy_types())
                .unwrap_or_default();
            (a.briefing.clone(), a.campaign.mission_number(), enemy_types)
        };

        wasm_bindgen_futures::spawn_local(async move {
            let text = briefing_or_fallback(&client, level, enemy_types).await;
            let mut a = app.borrow_mut();
            // Ignore briefings for a level the pilot already left
            if a.campaign.mission_number() == level {
                a.campaign.briefing_received(text);
            }
            if let Some(document) = page_document() {
                a.update_screens(&document);
            }
        });
    }

    fn launch_mission(app: &Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if !a.campaign.launch_mission() {
                return;
            }
            let Some(level) = a.campaign.current_level().cloned() else {
                log::error!("No level config for mission {}", a.campaign.mission_number());
                return;
            };
            let seed = js_sys::Date::now() as u64;
            a.session = Some(Session::new(&level, seed));
            a.input.release_all();
            if let Some(document) = page_document() {
                a.update_screens(&document);
            }
        }
        request_animation_frame(app.clone());
    }

    fn end_mission(app: &Rc<RefCell<App>>, outcome: MissionOutcome) {
        let next_briefing = {
            let mut a = app.borrow_mut();
            a.cancel_frame();
            if let Some(session) = a.session.as_mut() {
                session.stop();
            }
            a.campaign.mission_ended(outcome);
            if let Some(document) = page_document() {
                a.update_screens(&document);
            }
            a.campaign.is_loading_briefing()
        };
        if next_briefing {
            request_briefing(app.clone());
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        let handlers: [(&str, fn(&Rc<RefCell<App>>)); 5] = [
            ("start-btn", |app| {
                app.borrow_mut().campaign.start_game();
                request_briefing(app.clone());
            }),
            ("quality-btn", |app| {
                let quality = app.borrow_mut().settings.cycle_quality();
                log::info!("Quality set to {}", quality.as_str());
            }),
            ("launch-btn", launch_mission),
            ("retry-btn", |app| {
                app.borrow_mut().campaign.restart();
                request_briefing(app.clone());
            }),
            ("play-again-btn", |app| {
                app.borrow_mut().campaign.restart();
                request_briefing(app.clone());
            }),
        ];

        for (id, handler) in handlers {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{id}");
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                handler(&app);
                if let Some(document) = page_document() {
                    app.borrow().update_screens(&document);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if a.campaign.screen == Screen::Playing && a.input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss drops held keys
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().input.release_all();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse aim, scaled from the displayed canvas size
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let w = canvas_clone.client_width() as f32;
                let h = canvas_clone.client_height() as f32;
                app.borrow_mut().input.pointer_moved(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                    w,
                    h,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse button fires
        let pointer_events: [(&str, fn(&mut InputTracker)); 3] = [
            ("mousedown", InputTracker::pointer_down),
            ("mouseup", InputTracker::pointer_up),
            ("mouseleave", InputTracker::pointer_left),
        ];
        for (name, apply) in pointer_events {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                apply(&mut app.borrow_mut().input);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_clone = app.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(app_clone, time);
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        app.borrow_mut().raf_handle = handle;
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let outcome = {
            let mut a = app.borrow_mut();
            a.raf_handle = None;
            let outcome = a.update(time);
            a.render();
            if let Some(document) = page_document() {
                a.update_hud(&document);
            }
            outcome
        };

        if let Some(outcome) = outcome {
            end_mission(&app, outcome);
            return;
        }

        let running = app
            .borrow()
            .session
            .as_ref()
            .is_some_and(|session| session.is_running());
        if running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: fly the whole campaign with the autopilot
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use nova_strike::briefing::fallback_briefing;
    use nova_strike::consts::TICK_MS;
    use nova_strike::sim::demo_input;
    use nova_strike::{Campaign, Screen, Session};

    env_logger::init();
    log::info!("Nova Strike (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` for the web version");

    /// Give up on a mission after this many display frames
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let mut campaign = Campaign::default();
    campaign.start_game();

    while campaign.screen == Screen::Briefing {
        campaign.briefing_received(fallback_briefing(campaign.mission_number()));
        if !campaign.launch_mission() {
            break;
        }
        let Some(level) = campaign.current_level().cloned() else {
            break;
        };

        let mut session = Session::new(&level, seed + campaign.mission_number() as u64);
        let mut outcome = None;
        for frame in 0..MAX_FRAMES {
            let input = demo_input(session.state());
            outcome = session.frame(frame as f64 * TICK_MS, &input);
            if outcome.is_some() {
                break;
            }
        }

        let Some(outcome) = outcome else {
            log::warn!(
                "Mission {} timed out with {} hostiles left",
                campaign.mission_number(),
                session.state().enemies_remaining()
            );
            break;
        };
        println!(
            "Mission {}: {:?} after {} ticks (shield {:.0}, hull {:.0})",
            campaign.mission_number(),
            outcome,
            session.state().time_ticks,
            session.state().player.shield,
            session.state().player.hull,
        );
        campaign.mission_ended(outcome);
    }

    println!("Campaign finished on {:?}", campaign.screen);
}
