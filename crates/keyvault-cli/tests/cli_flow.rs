use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const PASSWORD: &str = "cli-test-password-123";
const MNEMONIC: &str = "test test test test test test test test test test test junk";

const ACCOUNT_KEYS: [&str; 3] = [
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
];

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_keyvault"))
}

struct TestEnv {
    dir: TempDir,
    config: PathBuf,
}

impl TestEnv {
    /// Temp dir with a config that keeps Argon2 cheap.
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = dir.path().join("config.toml");
        let contents = format!(
            "[kdf]\nmemory_kib = 256\niterations = 1\nparallelism = 1\n{}",
            extra
        );
        std::fs::write(&config, contents).expect("write config");
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("KEYVAULT_CONFIG", &self.config)
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("KEYVAULT_PASSWORD")
            .env_remove("KEYVAULT_MNEMONIC")
            .env_remove("KEYVAULT_BIP39_PASSPHRASE")
            .env_remove("KEYVAULT_LOG")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str], password: Option<&str>) -> Output {
        let mut cmd = self.command();
        cmd.args(args);
        if let Some(password) = password {
            cmd.env("KEYVAULT_PASSWORD", password);
        }
        cmd.output().expect("run keyvault")
    }

    fn store_master(&self, output: &Path) {
        let result = self
            .command()
            .args(["master", "--output", output.to_str().expect("utf8 path")])
            .env("KEYVAULT_MNEMONIC", MNEMONIC)
            .env("KEYVAULT_PASSWORD", PASSWORD)
            .output()
            .expect("run keyvault master");
        assert!(
            result.status.success(),
            "master failed: {}",
            String::from_utf8_lossy(&result.stderr)
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn test_cli_encrypt_decrypt_round_trip() {
    let env = TestEnv::new();
    let input = env.path("secret.txt");
    let blob = env.path("secret.kv");
    let restored = env.path("restored.txt");
    std::fs::write(&input, b"xprv-or-anything-else").expect("write input");

    let encrypt = env.run(
        &[
            "encrypt",
            "--input",
            input.to_str().unwrap(),
            "--output",
            blob.to_str().unwrap(),
        ],
        Some(PASSWORD),
    );
    assert!(encrypt.status.success(), "{}", String::from_utf8_lossy(&encrypt.stderr));

    let on_disk = std::fs::read(&blob).expect("read blob");
    assert_eq!(on_disk[0], 0x01);
    assert_eq!(on_disk.len(), b"xprv-or-anything-else".len() + 57);

    let decrypt = env.run(
        &[
            "decrypt",
            "--input",
            blob.to_str().unwrap(),
            "--output",
            restored.to_str().unwrap(),
        ],
        Some(PASSWORD),
    );
    assert!(decrypt.status.success(), "{}", String::from_utf8_lossy(&decrypt.stderr));
    assert_eq!(
        std::fs::read(&restored).expect("read restored"),
        b"xprv-or-anything-else"
    );
}

#[test]
fn test_cli_decrypt_to_stdout() {
    let env = TestEnv::new();
    let input = env.path("note.txt");
    let blob = env.path("note.kv");
    std::fs::write(&input, "hello vault").expect("write input");

    env.run(
        &["encrypt", "-i", input.to_str().unwrap(), "-o", blob.to_str().unwrap()],
        Some(PASSWORD),
    );
    let decrypt = env.run(&["decrypt", "-i", blob.to_str().unwrap()], Some(PASSWORD));

    assert!(decrypt.status.success());
    assert_eq!(stdout(&decrypt), "hello vault");
}

#[test]
fn test_cli_wrong_password_exit_code() {
    let env = TestEnv::new();
    let input = env.path("secret.txt");
    let blob = env.path("secret.kv");
    std::fs::write(&input, b"data").expect("write input");

    env.run(
        &["encrypt", "-i", input.to_str().unwrap(), "-o", blob.to_str().unwrap()],
        Some(PASSWORD),
    );
    let decrypt = env.run(
        &["decrypt", "-i", blob.to_str().unwrap()],
        Some("not-the-password"),
    );

    assert_eq!(decrypt.status.code(), Some(5));
    assert!(decrypt.stdout.is_empty());
    assert!(String::from_utf8_lossy(&decrypt.stderr).contains("Authentication failed"));
}

#[test]
fn test_cli_truncated_blob_is_invalid_input() {
    let env = TestEnv::new();
    let blob = env.path("short.kv");
    std::fs::write(&blob, [0x01u8; 20]).expect("write blob");

    let decrypt = env.run(&["decrypt", "-i", blob.to_str().unwrap()], Some(PASSWORD));
    assert_eq!(decrypt.status.code(), Some(4));
}

#[test]
fn test_cli_weak_password_rejected() {
    let env = TestEnv::new();
    let input = env.path("secret.txt");
    std::fs::write(&input, b"data").expect("write input");

    let encrypt = env.run(&["encrypt", "-i", input.to_str().unwrap()], Some("short"));
    assert_eq!(encrypt.status.code(), Some(4));
}

#[test]
fn test_cli_missing_password_without_tty() {
    let env = TestEnv::new();
    let input = env.path("secret.txt");
    std::fs::write(&input, b"data").expect("write input");

    let encrypt = env.run(&["encrypt", "-i", input.to_str().unwrap()], None);
    assert!(!encrypt.status.success());
    assert!(String::from_utf8_lossy(&encrypt.stderr).contains("KEYVAULT_PASSWORD"));
}

#[test]
fn test_cli_master_and_derive_accounts() {
    let env = TestEnv::new();
    let master = env.path("master.kv");
    env.store_master(&master);

    let derive = env.run(
        &[
            "derive",
            "--master",
            master.to_str().unwrap(),
            "--path",
            "m/44'/60'/0'/0/0",
            "--count",
            "3",
            "--json",
        ],
        Some(PASSWORD),
    );
    assert!(derive.status.success(), "{}", String::from_utf8_lossy(&derive.stderr));

    let keys: serde_json::Value = serde_json::from_str(&stdout(&derive)).expect("json output");
    let keys = keys.as_array().expect("array");
    assert_eq!(keys.len(), 3);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(key["path"], format!("m/44'/60'/0'/0/{}", i));
        assert_eq!(key["private_key"], ACCOUNT_KEYS[i]);
    }
}

#[test]
fn test_cli_derive_uses_configured_default_path() {
    let env = TestEnv::with_config("[derivation]\ndefault_path = \"m/44'/60'/0'/0/2\"\n");
    let master = env.path("master.kv");
    env.store_master(&master);

    let derive = env.run(
        &["--quiet", "derive", "--master", master.to_str().unwrap()],
        Some(PASSWORD),
    );
    assert!(derive.status.success(), "{}", String::from_utf8_lossy(&derive.stderr));
    assert_eq!(stdout(&derive).trim(), ACCOUNT_KEYS[2]);
}

#[test]
fn test_cli_derive_wrong_password() {
    let env = TestEnv::new();
    let master = env.path("master.kv");
    env.store_master(&master);

    let derive = env.run(
        &["derive", "--master", master.to_str().unwrap()],
        Some("wrong-password-456"),
    );
    assert_eq!(derive.status.code(), Some(5));
}

#[test]
fn test_cli_derive_malformed_path() {
    let env = TestEnv::new();
    let master = env.path("master.kv");
    env.store_master(&master);

    let derive = env.run(
        &["derive", "--master", master.to_str().unwrap(), "--path", "m/44'/x/0"],
        Some(PASSWORD),
    );
    assert_eq!(derive.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&derive.stderr).contains("Invalid derivation path"));
}

#[test]
fn test_cli_derive_missing_master() {
    let env = TestEnv::new();
    let derive = env.run(
        &["derive", "--master", env.path("absent.kv").to_str().unwrap()],
        Some(PASSWORD),
    );
    assert_eq!(derive.status.code(), Some(3));
}

#[test]
fn test_cli_master_refuses_overwrite() {
    let env = TestEnv::new();
    let master = env.path("master.kv");
    env.store_master(&master);
    let before = std::fs::read(&master).expect("read master");

    let again = env
        .command()
        .args(["master", "--output", master.to_str().unwrap()])
        .env("KEYVAULT_MNEMONIC", MNEMONIC)
        .env("KEYVAULT_PASSWORD", PASSWORD)
        .output()
        .expect("run keyvault master");

    assert_eq!(again.status.code(), Some(4));
    assert_eq!(std::fs::read(&master).expect("read master"), before);
}

#[test]
fn test_cli_config_init_and_show() {
    let env = TestEnv::new();
    let config = env.path("fresh").join("config.toml");

    let init = env
        .command()
        .args(["config", "init"])
        .env("KEYVAULT_CONFIG", &config)
        .output()
        .expect("run config init");
    assert!(init.status.success(), "{}", String::from_utf8_lossy(&init.stderr));
    assert!(config.exists());

    let again = env
        .command()
        .args(["config", "init"])
        .env("KEYVAULT_CONFIG", &config)
        .output()
        .expect("run config init");
    assert_eq!(again.status.code(), Some(4));

    let show = env
        .command()
        .args(["config", "show", "--json"])
        .env("KEYVAULT_CONFIG", &config)
        .output()
        .expect("run config show");
    let value: serde_json::Value = serde_json::from_str(&stdout(&show)).expect("json output");
    assert_eq!(value["derivation"]["default_path"], "m/44'/60'/0'/0/0");
    assert_eq!(value["kdf"]["memory_kib"], 65536);
}

#[test]
fn test_cli_invalid_kdf_config() {
    let env = TestEnv::new();
    std::fs::write(&env.config, "[kdf]\nmemory_kib = 1\niterations = 0\n").expect("write config");
    let input = env.path("secret.txt");
    std::fs::write(&input, b"data").expect("write input");

    let encrypt = env.run(&["encrypt", "-i", input.to_str().unwrap()], Some(PASSWORD));
    assert_eq!(encrypt.status.code(), Some(4));
}
