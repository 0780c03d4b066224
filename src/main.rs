//! Hoop Shot entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use hoop_shot::Settings;
    use hoop_shot::consts::*;
    use hoop_shot::renderer::{RenderState, build_scene};
    use hoop_shot::sim::{GamePhase, GameState, ScoreKind, TickInput, tick};
    use hoop_shot::ui::{self, TuningControl, TuningPanel, dom};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        panel: TuningPanel,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let panel = TuningPanel::from_params(&settings.physics);
            let mut state = GameState::new();
            state.physics = panel.params();
            Self {
                state,
                render_state: None,
                settings,
                panel,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;
            self.input.physics = Some(self.panel.params());

            let mut substeps = 0;
            while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.accumulator -= TICK_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start_charge = false;
                self.input.release_charge = false;
                self.input.reset = false;
                self.input.velocity_override = None;
            }

            // Drop backlog we could not catch up on
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(TICK_DT);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state.snapshot(), &self.settings);
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

        /// Space pressed: start charging while aiming, abandon the shot while shooting
        fn press_shoot(&mut self) {
            match self.state.phase {
                GamePhase::Aiming => self.input.start_charge = true,
                GamePhase::Shooting => self.input.reset = true,
                GamePhase::Celebrating => {}
            }
        }

        fn slider_changed(&mut self, control: TuningControl, value: f32) {
            self.panel.slider_mut(control).set(value);
            self.settings.physics = self.panel.params();
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let snapshot = self.state.snapshot();

            if let Some(el) = document.query_selector(dom::HUD_SCORE).ok().flatten() {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            if let Some(el) = document.query_selector(dom::HUD_ANGLE).ok().flatten() {
                el.set_text_content(Some(&ui::angle_readout(snapshot.angle_deg)));
            }
            if let Some(el) = document.query_selector(dom::HUD_POWER).ok().flatten() {
                el.set_text_content(Some(&ui::power_readout(snapshot.power)));
            }

            // Celebration banner, blinking unless reduced motion is on
            if let Some(el) = document.get_element_by_id(dom::CELEBRATION_BANNER) {
                let celebration = snapshot.celebration();
                if snapshot.phase == GamePhase::Celebrating
                    && celebration.is_visible(self.settings.reduced_motion)
                {
                    let (text, class) = match celebration.kind {
                        ScoreKind::Fair => ("WELL DONE!", "fair"),
                        ScoreKind::Cheat => ("HAHA CHEATER!", "cheat"),
                    };
                    el.set_text_content(Some(text));
                    let _ = el.set_attribute("class", class);
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id(dom::TUNING_PANEL) {
                let class = if self.settings.show_tuning_panel { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            for control in TuningControl::ALL {
                let label_id = dom::label_id(control.dom_id());
                if let Some(el) = document.get_element_by_id(&label_id) {
                    el.set_text_content(Some(&self.panel.slider(control).display()));
                }
            }

            // Mirror the live velocity unless the player is typing in a field
            let active_id = document.active_element().map(|el| el.id());
            let editing = matches!(
                active_id.as_deref(),
                Some(id) if id == dom::VELOCITY_X || id == dom::VELOCITY_Y
            );
            if !editing {
                self.panel.show_velocity(snapshot.ball_vel);
                set_input_value(document, dom::VELOCITY_X, &self.panel.velocity_x.text);
                set_input_value(document, dom::VELOCITY_Y, &self.panel.velocity_y.text);
            }
        }
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        if let Some(input) = input_element(document, id) {
            input.set_value(value);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Hoop Shot starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id(dom::LOADING) {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(dom::CANVAS)
            .ok_or("no canvas")?
            .dyn_into()?;

        // Canvas keeps the court's aspect ratio
        canvas.set_width(COURT_WIDTH as u32);
        canvas.set_height(COURT_HEIGHT as u32);

        let settings = Settings::from_host(canvas.get_attribute("data-settings").as_deref());
        let game = Rc::new(RefCell::new(Game::new(settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, canvas.width(), canvas.height())
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        sync_sliders(&document, &game.borrow().panel);
        setup_input_handlers(&window, game.clone());
        setup_tuning_panel(&document, game.clone());

        if let Some(hud) = document.get_element_by_id(dom::HUD) {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Hoop Shot running!");
        Ok(())
    }

    /// Push the panel values into the range inputs
    fn sync_sliders(document: &Document, panel: &TuningPanel) {
        for control in TuningControl::ALL {
            if let Some(input) = input_element(document, control.dom_id()) {
                let slider = panel.slider(control);
                input.set_min(&slider.min.to_string());
                input.set_max(&slider.max.to_string());
                input.set_value_as_number(slider.value() as f64);
            }
        }
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.press_shoot();
                        }
                    }
                    "ArrowLeft" => g.input.turn_left = true,
                    "ArrowRight" => g.input.turn_right = true,
                    "t" | "T" => {
                        g.settings.show_tuning_panel = !g.settings.show_tuning_panel;
                    }
                    "m" | "M" => {
                        g.settings.reduced_motion = !g.settings.reduced_motion;
                        log::info!("Reduced motion: {}", g.settings.reduced_motion);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.release_charge = true;
                    }
                    "ArrowLeft" => g.input.turn_left = false,
                    "ArrowRight" => g.input.turn_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup never arrives, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.turn_left = false;
                g.input.turn_right = false;
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_tuning_panel(document: &Document, game: Rc<RefCell<Game>>) {
        for control in TuningControl::ALL {
            let Some(input) = input_element(document, control.dom_id()) else {
                log::warn!("Missing slider #{}", control.dom_id());
                continue;
            };
            let game = game.clone();
            let source = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let value = source.value_as_number() as f32;
                game.borrow_mut().slider_changed(control, value);
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id(dom::APPLY_VELOCITY) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if let Some(input) = input_element(&document, dom::VELOCITY_X) {
                    g.panel.velocity_x.edit(&input.value());
                }
                if let Some(input) = input_element(&document, dom::VELOCITY_Y) {
                    g.panel.velocity_y.edit(&input.value());
                }
                if let Some(vel) = g.panel.commit_velocity() {
                    log::info!("Velocity override: {:?}", vel);
                    g.input.velocity_override = Some(vel);
                }
                // Show the reverted text if a field was rejected
                set_input_value(&document, dom::VELOCITY_X, &g.panel.velocity_x.text);
                set_input_value(&document, dom::VELOCITY_Y, &g.panel.velocity_y.text);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                TICK_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hoop_shot::Settings;

    env_logger::init();
    log::info!("Hoop Shot (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings_json = std::env::args().nth(1);
    let score = native::demo_session(Settings::from_host(settings_json.as_deref()));
    log::info!("Demo session finished with score {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless scripted session: a handful of shots at varying power
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use hoop_shot::Settings;
    use hoop_shot::consts::TICKS_PER_SECOND;
    use hoop_shot::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    const SHOTS: u32 = 5;
    /// Give up on a shot that never settles
    const SHOT_TIMEOUT_TICKS: u32 = 20 * TICKS_PER_SECOND as u32;

    pub fn demo_session(settings: Settings) -> u32 {
        let mut state = GameState::new();
        state.physics = settings.physics;

        for shot in 0..SHOTS {
            let charge_ticks = 20 + shot * 6;
            run_shot(&mut state, charge_ticks);
        }

        state.score
    }

    fn run_shot(state: &mut GameState, charge_ticks: u32) {
        tick(
            state,
            &TickInput {
                start_charge: true,
                ..Default::default()
            },
        );
        for _ in 1..charge_ticks {
            tick(state, &TickInput::default());
        }
        tick(
            state,
            &TickInput {
                release_charge: true,
                ..Default::default()
            },
        );

        for elapsed in 0..SHOT_TIMEOUT_TICKS {
            let input = TickInput {
                // Abandon a shot that is still rolling near the end
                reset: elapsed + 1 == SHOT_TIMEOUT_TICKS,
                ..Default::default()
            };
            tick(state, &input);

            for event in &state.events {
                match event {
                    GameEvent::Scored(kind) => log::info!("{:?} basket", kind),
                    GameEvent::HoopMoved { pos } => log::info!("Hoop moved to {:?}", pos),
                    _ => {}
                }
            }
            if state.phase == GamePhase::Aiming {
                break;
            }
        }
    }
}
