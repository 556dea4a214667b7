use infra_plan::config::apply_env_overrides;
use infra_plan::output::{banner, print_resources, print_subnets};
use infra_plan::processing::hash_directory;
use infra_plan::{load_environment_config, plan_environment, Environment};
use std::error::Error;
use std::path::Path;

// infra-plan [dev|staging|prod] [config.json]
fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let environment: Environment = args.first().map(String::as_str).unwrap_or("dev").parse()?;
    let config = load_environment_config(args.get(1).map(String::as_str), environment)?;
    let config = apply_env_overrides(config, |k| std::env::var(k).ok())?;

    // Hashed once here and passed down.
    let source_hash = match std::env::var("INFRA_LAMBDA_SOURCE_DIR") {
        Ok(dir) => Some(hash_directory(Path::new(&dir))?),
        Err(_) => None,
    };

    let plan = plan_environment(&config, source_hash.as_deref())?;

    println!("{}", banner(&format!("network plan: {environment}")));
    println!("{}", plan.network);
    print_subnets(&plan.network);
    println!("{}", banner(&format!("resource names: {environment}")));
    print_resources(&plan.names);

    log::info!("#End main()");
    Ok(())
}
