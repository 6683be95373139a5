#[cfg(test)]
mod registration_tests {
    use clap::Parser;
    use std::cell::Cell;
    use std::time::Duration;

    use rps_upstream::{
        run, Args, MemoryStore, RedisStore, RegistrarError, StoreConfig, StoreError,
        UpstreamRecord, UpstreamStore,
    };

    /// Store that refuses every write, like a read-only replica
    struct ReadOnlyStore;

    impl UpstreamStore for ReadOnlyStore {
        fn add_member(&mut self, key: &str, _member: &str) -> Result<bool, StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                source: redis::RedisError::from((
                    redis::ErrorKind::ReadOnly,
                    "You can't write against a read only replica.",
                )),
            })
        }
    }

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["add-upstream"];
        full.extend_from_slice(argv);
        Args::parse_from(full)
    }

    fn with_store<'a>(
        store: &'a mut MemoryStore,
    ) -> impl FnOnce(&StoreConfig) -> Result<&'a mut MemoryStore, StoreError> {
        move |_| Ok(store)
    }

    fn refused() -> StoreError {
        StoreError::Connect {
            addr: "127.0.0.1:6379".to_string(),
            source: redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")),
        }
    }

    /// Registering with an explicit socks5 proto writes the canonical member
    #[test]
    fn test_scenario_explicit_proto() {
        let mut store = MemoryStore::new();
        let mut out = Vec::new();

        let registration = run(
            &args(&["10.0.0.1:1080", "--proto", "socks5"]),
            with_store(&mut store),
            &mut out,
        )
        .unwrap();

        let expected =
            r#"{"host":"10.0.0.1","port":1080,"proto":"socks5","username":null,"password":null}"#;
        assert_eq!(registration.key, "rps:upstream:socks5");
        assert_eq!(store.members("rps:upstream:socks5"), vec![expected]);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\nsuccess\n", expected));
    }

    /// Credentials end up in the member
    #[test]
    fn test_scenario_credentials() {
        let mut store = MemoryStore::new();
        let mut out = Vec::new();

        run(
            &args(&["10.0.0.1:1080", "--username", "u", "--password", "p"]),
            with_store(&mut store),
            &mut out,
        )
        .unwrap();

        let members = store.members("rps:upstream:socks5");
        assert_eq!(members.len(), 1);
        let record: UpstreamRecord = serde_json::from_str(members[0]).unwrap();
        assert_eq!(record.username.as_deref(), Some("u"));
        assert_eq!(record.password.as_deref(), Some("p"));
        assert!(members[0].contains(r#""username":"u","password":"p""#));
    }

    #[test]
    fn test_custom_proto_key() {
        let mut store = MemoryStore::new();
        let registration = run(
            &args(&["proxy.local:8080", "--proto", "foo"]),
            with_store(&mut store),
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(registration.key, "rps:upstream:foo");
        assert_eq!(store.keys(), vec!["rps:upstream:foo"]);
    }

    /// Repeated and port-varied registrations follow set semantics
    #[test]
    fn test_set_semantics() {
        let mut store = MemoryStore::new();

        for address in ["10.0.0.1:1080", "10.0.0.1:1080", "10.0.0.1:1081"] {
            run(&args(&[address]), with_store(&mut store), &mut Vec::new()).unwrap();
        }

        assert_eq!(store.writes(), 3);
        assert_eq!(store.members("rps:upstream:socks5").len(), 2);
    }

    /// Malformed addresses fail before the store is touched
    #[test]
    fn test_malformed_address_never_connects() {
        for address in ["nocolon", "host:abc", ":1080", "host:", "[::1:1080"] {
            let connected = Cell::new(false);
            let mut out = Vec::new();

            let err = run(
                &args(&[address]),
                |_: &StoreConfig| {
                    connected.set(true);
                    Ok(MemoryStore::new())
                },
                &mut out,
            )
            .unwrap_err();

            assert!(matches!(err, RegistrarError::Argument(_)), "{}: {:?}", address, err);
            assert_eq!(err.exit_code(), 3);
            assert!(!connected.get(), "{} reached the store", address);
            assert!(out.is_empty());
        }
    }

    /// A store that cannot be reached yields a storage error and no output
    #[test]
    fn test_unreachable_store() {
        let mut out = Vec::new();
        let err = run(
            &args(&["10.0.0.1:1080"]),
            |_: &StoreConfig| Err::<MemoryStore, _>(refused()),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, RegistrarError::Storage(StoreError::Connect { .. })));
        assert_ne!(err.exit_code(), 0);
        assert!(out.is_empty());
    }

    /// A store that rejects the write yields a storage error and no output
    #[test]
    fn test_rejected_write() {
        let mut out = Vec::new();
        let err = run(
            &args(&["10.0.0.1:1080"]),
            |_: &StoreConfig| Ok(ReadOnlyStore),
            &mut out,
        )
        .unwrap_err();

        match &err {
            RegistrarError::Storage(StoreError::Write { key, .. }) => {
                assert_eq!(key, "rps:upstream:socks5")
            }
            other => panic!("expected a rejected write, got {:?}", other),
        }
        assert_eq!(err.exit_code(), 4);
        assert!(out.is_empty());
    }

    /// Store settings from the command line reach the connector
    #[test]
    fn test_store_config_passed_to_connector() {
        let seen = Cell::new(None);
        run(
            &args(&[
                "10.0.0.1:1080",
                "--redis-host",
                "dev1",
                "--redis-port",
                "6390",
                "--redis-timeout",
                "2s",
            ]),
            |config: &StoreConfig| {
                seen.set(Some((config.address(), config.timeout)));
                Ok(MemoryStore::new())
            },
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(
            seen.take(),
            Some(("dev1:6390".to_string(), Duration::from_secs(2)))
        );
    }

    /// Real client against a loopback port with no listener
    #[test]
    fn test_redis_store_connection_refused() {
        let mut out = Vec::new();
        let err = run(
            &args(&[
                "10.0.0.1:1080",
                "--redis-host",
                "127.0.0.1",
                "--redis-port",
                "1",
                "--redis-timeout",
                "500ms",
            ]),
            RedisStore::connect,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, RegistrarError::Storage(_)));
        assert_eq!(err.exit_code(), 4);
        assert!(out.is_empty());
    }
}
