use clap::Parser;
use color_eyre::Result;
use homeplan::cli::{self, Cli, Commands};
use homeplan::{Config, Contact, Database, Profile, utils};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();
    let profile = Profile::from_dev_flag(cli.dev);

    // --config points at an explicit file; otherwise the profile decides
    let config = match &cli.config {
        Some(path) => Config::load_from_path(
            &utils::expand_path(path),
            &Config::default_database_path_for_profile(profile),
        )?,
        None => Config::load_with_profile(profile)?,
    };

    cli::init_tracing(&cli::resolve_log_level(
        cli.log_level.as_deref(),
        &config.log_level,
    ))?;

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;

    match cli.command {
        Commands::Calendar { month, json } => {
            cli::handle_calendar(month, json, config.week_start, &db)?;
        }
        Commands::AddEvent {
            title,
            start,
            end,
            recurrence,
            description,
            color,
            categories,
            people,
        } => {
            cli::handle_add_event(
                title, start, end, recurrence, description, color, categories, people, &db,
            )?;
        }
        Commands::AddTask {
            title,
            start,
            end,
            recurrence,
            status,
            priority,
            description,
            color,
            categories,
            people,
        } => {
            cli::handle_add_task(
                title, start, end, recurrence, status, priority, description, color, categories,
                people, &db,
            )?;
        }
        Commands::AddPerson {
            first_name,
            last_name,
            birthday,
            avatar,
        } => {
            cli::handle_add_person(first_name, last_name, birthday, avatar, &db)?;
        }
        Commands::AddContact {
            first_name,
            last_name,
            birthday,
            email,
            mobile_phone,
            fixed_phone,
            address,
            postal_code,
            city,
            country,
        } => {
            let contact = Contact {
                email,
                mobile_phone,
                fixed_phone,
                address,
                postal_code,
                city,
                country,
                ..Contact::new(first_name, last_name)
            };
            cli::handle_add_contact(contact, birthday, &db)?;
        }
        Commands::AddCategory {
            title,
            description,
            color,
        } => {
            cli::handle_add_category(title, description, color, &db)?;
        }
        Commands::AddNote {
            title,
            content,
            folder,
        } => {
            cli::handle_add_note(title, content, folder, &db)?;
        }
        Commands::Notes { folder } => {
            cli::handle_list_notes(folder, &db)?;
        }
        Commands::Note(command) => {
            cli::handle_note(command, &db)?;
        }
        Commands::Folder(command) => {
            cli::handle_folder(command, &db)?;
        }
        Commands::Events => {
            cli::handle_list_events(&db)?;
        }
        Commands::Tasks { by_status } => {
            cli::handle_list_tasks(by_status, &db)?;
        }
        Commands::Task(command) => {
            cli::handle_task(command, &db)?;
        }
        Commands::People => {
            cli::handle_list_people(&db)?;
        }
        Commands::Contacts => {
            cli::handle_list_contacts(&db)?;
        }
        Commands::Categories => {
            cli::handle_list_categories(&db)?;
        }
        Commands::Delete(command) => {
            cli::handle_delete(command, &db)?;
        }
    }

    Ok(())
}
