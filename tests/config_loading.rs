// Config file loading tests

use std::io::Write;

use earth_components::integration::CAPABILITIES_MOD;
use earth_components::{
    ComponentError, ComponentsConfig, InventoryComponent, Registries, TankComponent, BUCKET,
};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "disabled_integrations = [\"{}\"]", CAPABILITIES_MOD).unwrap();
    writeln!(file, "fallback_inventory_size = 9").unwrap();
    writeln!(file, "fallback_tank_count = 2").unwrap();
    file.flush().unwrap();

    let config = ComponentsConfig::load(file.path()).unwrap();
    assert!(config.is_disabled(CAPABILITIES_MOD));
    assert_eq!(config.fallback_inventory_size, 9);
    assert_eq!(config.fallback_tank_capacity, 4 * BUCKET);

    let inv = config.fallback_inventory(|| {});
    assert_eq!(inv.size(), 9);
    let tanks = config.fallback_tank(|| {});
    assert_eq!(tanks.tanks(), 2);
    assert_eq!(tanks.max_capacity(1), 4 * BUCKET);
}

#[test]
fn test_loaded_config_drives_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("components.toml");
    std::fs::write(&path, format!("disabled_integrations = [\"{}\"]\n", CAPABILITIES_MOD)).unwrap();

    let config = ComponentsConfig::load(&path).unwrap();
    let registries = Registries::bootstrap(&[CAPABILITIES_MOD][..], &config).unwrap();
    assert_eq!(registries.inventories.block_hook_ids(), vec!["engine-container"]);
    assert!(registries.tanks.item_hook_ids().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ComponentsConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ComponentError::Io(_)));
}
