use exchange_core::*;
use num_bigint::BigInt;

const RESERVE: &str = "Mxc41f4fd29af8f02055821961239bfd1b8cd4c77a";
const RESERVE_MNEMONIC: &str =
    "opera spare oblige eight boring lady survey photo ugly unfold rib economy";

fn testnet_provider(ledger: StaticLedger) -> Provider<StaticLedger> {
    let config = ProviderConfig::new(
        Some("http://localhost:8843".to_string()),
        Some(TESTNET_CHAIN_ID.to_string()),
    );
    Provider::new(&config, ledger)
}

#[test]
fn test_asset_parts_and_natural_agree() {
    let from_parts = Asset::new(BigInt::from(140_003), 4, "test").unwrap();
    let from_natural = Asset::from_natural("14.0003", "TEST").unwrap();

    assert_eq!(from_parts, from_natural);
    assert_eq!(from_parts.natural(), "14.0003");
    assert_eq!(from_natural.amount(), 140_003);

    println!("OK: Parts and natural construction agree");
}

#[test]
fn test_zero_canonicalization() {
    let parsed = Asset::from_natural("0", "TEST").unwrap();
    let built = Asset::new(BigInt::from(0), 0, "TEST").unwrap();

    assert_eq!(parsed.precision(), 0);
    assert_eq!(parsed.natural(), "0");
    assert_eq!(parsed, built);
    assert_eq!(
        Asset::from_natural("0.000", "TEST"),
        Err(AssetError::InvalidPrecision(3))
    );
}

#[test]
fn test_failed_construction_yields_no_value() {
    let result = Asset::from_natural("3.", "TEST");
    assert!(result.is_err());

    // Errors surface through the crate-level error type too.
    let err: ExchangeError = result.unwrap_err().into();
    assert_eq!(err.to_string(), "Asset error: Invalid amount format: \"3.\"");
}

#[test]
fn test_ledger_workflow() {
    let ledger = StaticLedger::new()
        .with_balance(RESERVE, "MNT", "2500000000000000000")
        .with_balance(RESERVE, "BTC", "100000000000000000")
        .with_nonce(RESERVE, 11)
        .with_min_gas_price("1");

    let mut provider = testnet_provider(ledger);
    provider.add_currency("mnt");
    provider.add_currency("btc");
    provider
        .load_wallet(derive_wallet(RESERVE_MNEMONIC).unwrap())
        .unwrap();

    assert_eq!(provider.status(), ProviderStatus::Ok);
    assert_eq!(provider.reserve_addr(), RESERVE);
    assert_eq!(provider.nonce(RESERVE).unwrap(), 11);

    let balances = provider.balance_assets(provider.reserve_addr()).unwrap();
    assert_eq!(balances.len(), 2);
    for balance in &balances {
        assert!(provider.currencies().contains(balance.symbol()));
        assert_eq!(balance.precision(), PIP_PRECISION);
    }

    // Spend 1.2 MNT out of 2.5 MNT, both at pip precision.
    let mnt = balances.iter().find(|a| a.symbol() == "MNT").unwrap();
    let spend_pips = BigInt::from(12u64) * BigInt::from(10u64).pow(17);
    let spend = Asset::new(spend_pips, PIP_PRECISION, "mnt").unwrap();
    let left = mnt.checked_sub(&spend).unwrap();
    assert_eq!(left.natural(), "1.300000000000000000");

    // A fee quoted at a different scale has to be rejected, not rescaled.
    let fee = provider.min_gas_price_asset().unwrap();
    assert_eq!(fee.to_string(), "1 MNT");
    assert_eq!(
        left.checked_sub(&fee),
        Err(AssetError::PrecisionMismatch(PIP_PRECISION, 0))
    );

    // Cross-asset arithmetic is rejected.
    let btc = balances.iter().find(|a| a.symbol() == "BTC").unwrap();
    assert_eq!(
        mnt.checked_add(btc),
        Err(AssetError::SymbolMismatch("MNT".to_string(), "BTC".to_string()))
    );
}

#[test]
fn test_misconfigured_provider_refuses_queries() {
    let provider = Provider::new(&ProviderConfig::default(), StaticLedger::new());
    assert_eq!(provider.status(), ProviderStatus::WrongNodeUrl);

    let err: ExchangeError = provider.balance(RESERVE).unwrap_err().into();
    assert_eq!(
        err.to_string(),
        "Provider error: Cannot get balance: error: {code: 3,  message: Wrong node URL}"
    );
}

#[test]
fn test_wallet_generation_and_restore() {
    let provider = testnet_provider(StaticLedger::new());
    let generated = provider.generate_wallet().unwrap();

    assert!(validate_mnemonic(generated.mnemonic()));
    assert!(Wallet::is_address(generated.addr()));

    let restored = derive_wallet(generated.mnemonic()).unwrap();
    assert_eq!(restored, generated);

    println!("OK: Wallet generation test passed");
    println!("  Address: {}", generated.addr());
}

#[test]
fn test_invalid_mnemonic_rejected() {
    assert!(!validate_mnemonic("invalid mnemonic phrase here"));
    assert!(derive_wallet("invalid mnemonic phrase here").is_err());
}

#[test]
fn test_assets_shared_across_threads() {
    let price = Asset::from_natural("3.14", "USD").unwrap();

    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let price = price.clone();
            std::thread::spawn(move || price.checked_mul(n).unwrap().natural())
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["3.14", "6.28", "9.42", "12.56"]);
    assert_eq!(price.natural(), "3.14");
}
