use clap::Parser;
use taginfo_gen::application::{
    init::init, GenerateOptions, GenerateService, ListTagsService, SourceOptions,
};
use taginfo_gen::cli::{format_outcome, format_tag_list, Cli, Commands, SourceArgs};
use taginfo_gen::error::TagInfoError;
use taginfo_gen::infrastructure::FileSystemRepository;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn source_options(args: SourceArgs) -> SourceOptions {
    SourceOptions {
        catalogs: args.catalogs,
        locales: args.locales,
        config: args.config,
    }
}

fn run(cli: Cli) -> Result<(), TagInfoError> {
    match cli.command {
        Commands::Generate {
            sources,
            output,
            dry_run,
        } => {
            let repo = FileSystemRepository::current()?;
            let service = GenerateService::new(repo);

            let outcome = service.execute(GenerateOptions {
                sources: source_options(sources),
                output,
                dry_run,
            })?;

            println!("{}", format_outcome(&outcome, dry_run));
            Ok(())
        }
        Commands::Tags { sources } => {
            let repo = FileSystemRepository::current()?;
            let service = ListTagsService::new(repo);

            let tags = service.execute(&source_options(sources))?;
            println!("{}", format_tag_list(&tags).trim_end());
            Ok(())
        }
        Commands::Init { path } => {
            let written = init(&path)?;
            println!("Wrote {}", written.display());
            Ok(())
        }
    }
}
