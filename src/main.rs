mod config;
mod logging;
mod todo;
mod tui;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Generator, Shell, generate};
use config::{Config, ConfigError, STORAGE_DIR_KEY};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use todo::controller::TodoController;
use todo::persistence::PersistenceGateway;
use todo::storage::FileStore;
use tracing::info;
use tui::{app::App, ui};

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "A to-do list that remembers itself between runs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Items(ItemCommand),
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ItemCommand {
    #[command(about = "Print the list")]
    List,
    #[command(about = "Add an item to the top of the list")]
    Add {
        #[arg(help = "Item title")]
        title: String,
    },
    #[command(about = "Check or uncheck an item")]
    Toggle {
        #[arg(help = "Item position, as printed by 'list'")]
        index: usize,
    },
    #[command(about = "Rename an item")]
    Edit {
        #[arg(help = "Item position, as printed by 'list'")]
        index: usize,
        #[arg(help = "New title")]
        title: String,
    },
    #[command(about = "Delete an item")]
    Remove {
        #[arg(help = "Item position, as printed by 'list'")]
        index: usize,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (currently only 'storage_dir' is supported)")]
        key: String,
        #[arg(help = "Configuration value", value_hint = ValueHint::DirPath)]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Config { action }) => {
            handle_config_command(action).map_err(anyhow::Error::from)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
            Ok(())
        }
        Some(Commands::Items(command)) => run_item_command(command),
        None => run_main_app(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{} = {}", STORAGE_DIR_KEY, config.get(STORAGE_DIR_KEY)?);
        }
    }
    Ok(())
}

fn open_controller() -> Result<TodoController> {
    let config = Config::load().context("Configuration error")?;
    let storage_dir = config.storage_dir().context("Configuration error")?;

    logging::init(&storage_dir.join("todolist.log"));
    info!(storage_dir = %storage_dir.display(), "opening list");

    let gateway = PersistenceGateway::new(FileStore::new(storage_dir));
    Ok(TodoController::open(gateway))
}

fn run_item_command(command: ItemCommand) -> Result<()> {
    let mut controller = open_controller()?;

    match command {
        ItemCommand::List => {}
        ItemCommand::Add { title } => {
            controller.on_title_input(title)?;
            controller.on_submit_pressed()?;
        }
        ItemCommand::Toggle { index } => {
            controller.on_checkbox_toggled(index)?;
        }
        ItemCommand::Edit { index, title } => {
            controller.on_edit_requested(index)?;
            controller.on_title_input(title)?;
            controller.on_submit_pressed()?;
        }
        ItemCommand::Remove { index } => {
            controller.on_delete_requested(index)?;
        }
    }

    print_items(&controller);
    Ok(())
}

fn print_items(controller: &TodoController) {
    if controller.store().is_empty() {
        println!("Add a Todo to your list");
        return;
    }

    for (i, item) in controller.items().iter().enumerate() {
        let checkbox = if item.is_checked { "[x]" } else { "[ ]" };
        println!("{}. {} {}", i, checkbox, item.title);
    }
}

fn run_main_app() -> Result<()> {
    let controller = open_controller()?;
    let mut app = App::new(controller);

    run_tui(&mut app)?;

    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Windows reports releases too; handle each key once.
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key)?;
            if app.should_quit {
                break;
            }
        }
    }
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
