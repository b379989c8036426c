use envargs::{FromEnv, define_env};
use tracing_subscriber::EnvFilter;

define_env! {
    /// Settings for the demo service
    #[derive(Debug)]
    pub struct DemoEnv {
        #[var(env = "TEST_STRING")]
        pub test_string: String,

        #[var(env = "TEST_INT", default = 123)]
        pub test_int: i64,

        #[var(env = "TEST_BOOL", default = true)]
        pub test_bool: bool,

        #[var(env = "TEST_RATIO")]
        pub test_ratio: Option<f64>,
    }
}

define_env! {
    /// Settings that cannot be satisfied by test.env
    #[derive(Debug)]
    pub struct ErrorEnv {
        #[var(env = "ERROR_TEST_STRING")]
        pub test_string: String,

        #[var(env = "TEST_WRONG_TYPE", default = 42)]
        pub test_wrong_type: i64,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    dotenvy::from_filename("./test.env").ok();
    match std::env::args().nth(1) {
        Some(arg) => match arg.as_str() {
            "default" => load_demo(),
            "error" => load_error(),
            "describe" => describe(),
            "docs" => generate_docs(),
            _ => println!(
                "unknown arg: {}. Available: default, error, describe, docs",
                arg
            ),
        },
        None => {
            println!("Usage: envargs-demo [command]");
            println!("Commands:");
            println!("  default  - Load the demo settings from the environment");
            println!("  error    - Load settings that fail and print the error");
            println!("  describe - Print the registered variables");
            println!("  docs     - Generate CONFIG.md documentation");
        }
    };
}

fn load_demo() {
    match DemoEnv::from_env() {
        Ok(env) => {
            println!("Environment loaded successfully!");
            println!("  test_string: {}", env.test_string);
            println!("  test_int: {}", env.test_int);
            println!("  test_bool: {}", env.test_bool);
            match env.test_ratio {
                Some(ratio) => println!("  test_ratio: {}", ratio),
                None => println!("  test_ratio: <unset>"),
            }
        }
        Err(e) => eprintln!("Failed to load environment: {}", e),
    }
}

fn load_error() {
    match ErrorEnv::from_env() {
        Ok(env) => println!("unexpectedly loaded: {:?}", env),
        Err(e) => eprintln!("Failed to load environment: {}", e),
    }
}

fn describe() {
    match DemoEnv::loader() {
        Ok(loader) => print!("{}", loader),
        Err(e) => eprintln!("Invalid registration: {}", e),
    }
}

fn generate_docs() {
    println!("Generating documentation for DemoEnv...");
    let loader = match DemoEnv::loader() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("✗ Invalid registration: {}", e);
            return;
        }
    };
    match loader.write_docs("CONFIG.md") {
        Ok(_) => println!("✓ Documentation written to CONFIG.md"),
        Err(e) => eprintln!("✗ Failed to write documentation: {}", e),
    }
}
