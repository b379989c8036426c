use envargs::{ConfigError, ConfigLoader, Value, ValueType, Variable};
use serial_test::serial;

fn scenario_loader() -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    loader
        .register(
            Variable::new("ENVARGS_IT_BOOL")
                .value_type(ValueType::Boolean)
                .default_value(false)
                .dest("bool"),
        )
        .unwrap();
    loader
        .register(
            Variable::new("ENVARGS_IT_INT")
                .value_type(ValueType::Integer)
                .dest("int"),
        )
        .unwrap();
    loader
        .register(
            Variable::new("ENVARGS_IT_STR")
                .required(false)
                .dest("str"),
        )
        .unwrap();
    loader
}

#[test]
#[serial]
fn test_end_to_end_against_process_env() {
    temp_env::with_vars(
        [
            ("ENVARGS_IT_INT", Some("42")),
            ("ENVARGS_IT_STR", None),
            ("ENVARGS_IT_BOOL", None),
        ],
        || {
            let ns = scenario_loader().evaluate().unwrap();

            assert_eq!(ns.get("bool"), Some(&Value::Boolean(false)));
            assert_eq!(ns.get("int"), Some(&Value::Integer(42)));
            assert_eq!(ns.get("str"), Some(&Value::Absent));
        },
    );
}

#[test]
#[serial]
fn test_missing_required_in_process_env() {
    temp_env::with_vars(
        [
            ("ENVARGS_IT_INT", None::<&str>),
            ("ENVARGS_IT_STR", None),
            ("ENVARGS_IT_BOOL", None),
        ],
        || {
            let result = scenario_loader().evaluate();

            assert_eq!(
                result,
                Err(ConfigError::MissingRequired {
                    key: "ENVARGS_IT_INT".to_string()
                })
            );
        },
    );
}

#[test]
#[serial]
fn test_evaluate_rereads_environment() {
    let mut loader = ConfigLoader::new();
    loader.optional("ENVARGS_IT_REREAD", ValueType::String).unwrap();

    let first = temp_env::with_var("ENVARGS_IT_REREAD", Some("one"), || {
        loader.evaluate().unwrap()
    });
    let second = temp_env::with_var_unset("ENVARGS_IT_REREAD", || loader.evaluate().unwrap());

    assert_eq!(first.get_str("envargs_it_reread").unwrap(), "one");
    assert_eq!(second.get("envargs_it_reread"), Some(&Value::Absent));
}

#[test]
#[serial]
fn test_string_round_trip() {
    let mut loader = ConfigLoader::new();
    loader.required("ENVARGS_IT_ROUND_TRIP", ValueType::String).unwrap();

    for raw in ["", "plain", "with spaces ", "=equals=", "ünïcödé", "0"] {
        let ns = temp_env::with_var("ENVARGS_IT_ROUND_TRIP", Some(raw), || {
            loader.evaluate().unwrap()
        });
        assert_eq!(ns.get_str("envargs_it_round_trip").unwrap(), raw);
    }
}

#[test]
#[serial]
fn test_empty_value_is_not_treated_as_unset() {
    let mut loader = ConfigLoader::new();
    loader.or_default("ENVARGS_IT_EMPTY", true).unwrap();

    temp_env::with_var("ENVARGS_IT_EMPTY", Some(""), || {
        assert_eq!(
            loader.evaluate(),
            Err(ConfigError::DecodeFailure {
                key: "ENVARGS_IT_EMPTY".to_string(),
                value_type: ValueType::Boolean,
                value: String::new(),
            })
        );
    });
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_value_is_a_decode_failure() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let mut loader = ConfigLoader::new();
    loader.required("ENVARGS_IT_BYTES", ValueType::String).unwrap();

    let raw = OsStr::from_bytes(&[b'f', 0xff]);
    temp_env::with_var("ENVARGS_IT_BYTES", Some(raw), || {
        assert_eq!(
            loader.evaluate(),
            Err(ConfigError::DecodeFailure {
                key: "ENVARGS_IT_BYTES".to_string(),
                value_type: ValueType::String,
                value: "f\u{FFFD}".to_string(),
            })
        );
    });
}
