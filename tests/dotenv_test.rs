use envargs::{ConfigError, ConfigLoader, ValueType};
use serial_test::serial;

fn load_fixtures() {
    dotenvy::from_filename("./test.env").expect("test.env must parse");
}

#[test]
#[serial]
fn test_primitives_from_dotenv() {
    load_fixtures();

    let mut loader = ConfigLoader::new();
    loader.required("ENVARGS_DOTENV_STRING", ValueType::String).unwrap();
    loader.required("ENVARGS_DOTENV_INT", ValueType::Integer).unwrap();
    loader.required("ENVARGS_DOTENV_FLOAT", ValueType::Float).unwrap();
    loader.required("ENVARGS_DOTENV_BOOL", ValueType::Boolean).unwrap();

    let ns = loader.evaluate().unwrap();

    assert_eq!(ns.get_str("envargs_dotenv_string").unwrap(), "from dotenv");
    assert_eq!(ns.get_int("envargs_dotenv_int").unwrap(), 42);
    assert_eq!(ns.get_float("envargs_dotenv_float").unwrap(), 123.123);
    assert!(ns.get_bool("envargs_dotenv_bool").unwrap());
}

#[test]
#[serial]
fn test_bad_bool_from_dotenv() {
    load_fixtures();

    let mut loader = ConfigLoader::new();
    loader.required("ENVARGS_DOTENV_BAD_BOOL", ValueType::Boolean).unwrap();

    assert_eq!(
        loader.evaluate(),
        Err(ConfigError::DecodeFailure {
            key: "ENVARGS_DOTENV_BAD_BOOL".to_string(),
            value_type: ValueType::Boolean,
            value: "yes".to_string(),
        })
    );
}

#[test]
#[serial]
fn test_default_ignored_when_dotenv_sets_value() {
    load_fixtures();

    let mut loader = ConfigLoader::new();
    loader.or_default("ENVARGS_DOTENV_INT", 7).unwrap();

    let ns = loader.evaluate().unwrap();
    assert_eq!(ns.get_int("envargs_dotenv_int").unwrap(), 42);
}
