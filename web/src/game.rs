use crate::surface::CanvasSurface;
use gloo::timers::callback::Interval;
use minado_core as game;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer(game::PointerInput),
    Tick,
    Reset,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: u64,
}

fn state_class(state: game::GameState) -> &'static str {
    use game::GameState::*;
    match state {
        NotStarted => "not-started",
        Active => "in-progress",
        Won => "win",
        Lost => "lose",
    }
}

/// What to do with the tick interval after a message has been handled.
#[derive(Copy, Clone, Debug, PartialEq)]
enum TimerAction {
    Start,
    Stop,
    Keep,
}

impl TimerAction {
    /// The interval runs exactly while the game is active.
    fn for_state(state: game::GameState, running: bool) -> Self {
        match (state.is_active(), running) {
            (true, false) => Self::Start,
            (false, true) => Self::Stop,
            _ => Self::Keep,
        }
    }
}

pub(crate) struct GameView {
    engine: game::Minesweeper,
    geometry: game::Geometry,
    palette: game::Palette,
    canvas: NodeRef,
    /// Only present while the game is active, dropping it cancels the interval.
    timer: Option<Interval>,
}

impl GameView {
    fn handle_pointer(&mut self, input: game::PointerInput) -> bool {
        let Some(command) = game::Command::from_pointer(input, self.geometry, self.engine.size())
        else {
            log::trace!("pointer ignored: {:?}", input);
            return false;
        };

        let (game::Command::Reveal(coords) | game::Command::ToggleFlag(coords)) = command;
        if let Some(cell) = self.engine.cell_at(coords) {
            let cell_json = serde_json::to_string(&cell).unwrap_or_default();
            log::debug!("clicking on {:?}: {}", coords, cell_json);
        }

        match self.engine.execute(command) {
            Ok(updated) => {
                if updated && self.engine.state() == game::GameState::Lost {
                    log::info!("Game over");
                }
                updated
            }
            Err(err) => {
                log::debug!("ignored {:?}: {}", command, err);
                false
            }
        }
    }

    fn sync_timer(&mut self, ctx: &Context<Self>) {
        match TimerAction::for_state(self.engine.state(), self.timer.is_some()) {
            TimerAction::Start => {
                let link = ctx.link().clone();
                self.timer = Some(Interval::new(1000, move || link.send_message(Msg::Tick)));
                log::debug!("timer started");
            }
            TimerAction::Stop => {
                // dropping the interval clears it
                self.timer = None;
                log::debug!("timer stopped");
            }
            TimerAction::Keep => {}
        }
    }

    fn paint(&self) {
        match CanvasSurface::from_node(&self.canvas) {
            Ok(mut surface) => {
                game::paint(self.engine.board(), self.geometry, &self.palette, &mut surface)
            }
            Err(err) => log::error!("cannot paint board: {:#}", err),
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let engine = game::Minesweeper::new(game::GameConfig::DEFAULT, ctx.props().seed)
            .expect("default config must be valid");
        Self {
            engine,
            geometry: game::Geometry::DEFAULT,
            palette: game::Palette::default(),
            canvas: NodeRef::default(),
            timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Pointer(input) => self.handle_pointer(input),
            Tick => self.engine.tick(),
            Reset => {
                self.engine.reset();
                true
            }
        };

        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (width, height) = self.geometry.surface_size(self.engine.size());
        let mines_left = game::format_counter(self.engine.mines_left());
        let elapsed_time = game::format_counter(
            i32::try_from(self.engine.elapsed_secs()).unwrap_or(i32::MAX),
        );
        let game_state_class = classes!(state_class(self.engine.state()));

        let cb_reset = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Reset
        });
        let cb_pointer = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            Pointer(game::PointerInput {
                button: game::PointerButton::from_dom_button(e.button()),
                offset_x: f64::from(e.offset_x()),
                offset_y: f64::from(e.offset_y()),
            })
        });

        html! {
            <div class="minado" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={game_state_class} title="New game" onclick={cb_reset}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                <canvas
                    ref={self.canvas.clone()}
                    width={width.to_string()}
                    height={height.to_string()}
                    onmousedown={cb_pointer}
                />
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        self.paint();
    }
}
