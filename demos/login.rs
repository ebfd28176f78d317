//! Terminal login screen with the monsters watching the pointer.
//!
//! ```text
//! cargo run --example login
//! cargo run --example login -- --svg frame.svg --password-visible
//! RUST_LOG=login_monsters=trace cargo run --example login -- --log-file monsters.log
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use login_monsters::state::input::{InputEvent, poll_event, route_event};
use login_monsters::{
    DiffRenderer, FormAction, FrameBuffer, FrameClock, LoginForm, ReactiveFlags, Result, Scene,
    SceneConfig, TerminalGuard, compute_login_layout, rasterize, render_svg,
};

/// Command-line arguments for the login demo
#[derive(Parser, Debug)]
#[command(name = "login")]
#[command(version, about = "Monsters that watch you log in", long_about = None)]
struct Args {
    /// Scene configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write one settled frame as SVG and exit
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Render the SVG frame with the form focused
    #[arg(long)]
    focused: bool,

    /// Render the SVG frame with the password visible
    #[arg(long)]
    password_visible: bool,

    /// Write logs to file (the terminal is busy drawing)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<SceneConfig> {
    match &args.config {
        Some(path) => SceneConfig::load(path),
        None => Ok(SceneConfig::default()),
    }
}

/// Settle the scene for a second and write it out.
fn write_svg(config: &SceneConfig, args: &Args, path: &Path) -> Result<()> {
    let flags = ReactiveFlags::from_form(args.focused, args.password_visible);
    let mut handle = Scene::new(config, flags.into())?.mount();
    let fps = args.fps.max(1);
    for _ in 0..fps {
        handle.tick(1.0 / fps as f32);
    }
    std::fs::write(path, render_svg(&handle.frame()))?;
    info!(path = %path.display(), ?flags, "svg written");
    Ok(())
}

fn run_terminal(config: &SceneConfig, args: &Args) -> Result<()> {
    let (mut width, mut height) = crossterm::terminal::size()?;
    let mut layout = compute_login_layout(width, height)?;

    let form = LoginForm::new();
    let mut handle = Scene::new(config, form.flags())?.mount();
    handle.set_bounds(Some(layout.scene));

    let mut guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    let mut buffer = FrameBuffer::new(width, height);
    let mut renderer = DiffRenderer::new();
    let mut clock = FrameClock::new(args.fps);
    info!(width, height, fps = args.fps, "login demo started");

    loop {
        if let Some(event) = poll_event(clock.time_until_next(Instant::now()))? {
            route_event(&event);
            match event {
                InputEvent::Key(key) => match form.handle_key(key) {
                    FormAction::Quit => break,
                    FormAction::Submit { username } => info!(%username, "submitted"),
                    FormAction::None => {}
                },
                InputEvent::Click(at) => form.click(layout.form, at.client_x, at.client_y),
                InputEvent::Resize(w, h) => {
                    (width, height) = (w, h);
                    layout = compute_login_layout(width, height)?;
                    handle.set_bounds(Some(layout.scene));
                    buffer.resize(width, height);
                    renderer.invalidate();
                    info!(width, height, "resized");
                }
                InputEvent::Pointer(_) | InputEvent::None => {}
            }
        }

        if !clock.time_until_next(Instant::now()).is_zero() {
            continue;
        }
        let dt = clock.tick();
        handle.tick(dt);

        buffer.clear();
        rasterize(&handle.frame(), &mut buffer, layout.scene);
        form.draw(&mut buffer, layout.form);
        renderer.render(&mut stdout, &buffer)?;
    }

    let scene = handle.unmount();
    info!(frames = clock.frames(), elapsed = scene.elapsed(), "login demo finished");
    guard.restore()?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    match &args.svg {
        Some(path) => write_svg(&config, args, path),
        None => run_terminal(&config, args),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(&args) {
        eprintln!("login: cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    // The guard inside `run` has restored the terminal by the time an
    // error gets here.
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "login demo failed");
            eprintln!("login: {err}");
            ExitCode::FAILURE
        }
    }
}
