use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use skyward::input::{map_key, map_mouse, GameInput};
use skyward::{build_info, ui, GameSession, World, TICK_INTERVAL_MS};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "skyward {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Skyward - Terminal Flappy Bird\n");
                println!("Usage: skyward\n");
                println!("Keys:");
                println!("  Space/Up/Enter  Flap (mouse click also works)");
                println!("  R               Restart after a crash");
                println!("  Q/Esc           Quit");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'skyward --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    // Cleanup terminal even if the game loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut world = World::new();
    let mut session = GameSession::new(&mut world);
    let mut rng = rand::thread_rng();

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &world, &session))?;

        // Poll for input (5ms, keeps the 16ms tick cadence responsive)
        if event::poll(Duration::from_millis(5))? {
            let input = match event::read()? {
                Event::Key(key_event) => map_key(key_event),
                Event::Mouse(mouse_event) => map_mouse(mouse_event),
                _ => None,
            };
            match input {
                Some(GameInput::Flap) => session.flap(&mut world, &mut rng),
                Some(GameInput::Restart) => session.restart(&mut world),
                Some(GameInput::Quit) => break,
                Some(GameInput::Other) | None => {}
            }
        }

        // Fixed simulation step
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            session.tick(&mut world, &mut rng);
            last_tick = Instant::now();
        }
    }

    Ok(())
}
