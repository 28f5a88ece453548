//! Fixed addresses, bumps and hashes, computed independently of this crate.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use alm_instructions::{
    common::{
        config::{AtomicSwapConfig, IntegrationConfig, Padding},
        programs::{self, ProgramIds},
        seeds,
    },
    derive, drift, kamino, ControllerIxBuilder,
};

fn key(s: &str) -> Pubkey {
    Pubkey::from_str(s).unwrap()
}

const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const WSOL: &str = "So11111111111111111111111111111111111111112";

fn controller_7() -> Pubkey {
    key("Bf4FKGJW73m27h3HwJ6ArN3uXArX6TtAACCoUYk48y7j")
}

#[test]
fn controller_address_and_bump() {
    let (address, bump) = derive::find_address_with_bump(
        &programs::ALM_CONTROLLER_MAINNET,
        &[seeds::CONTROLLER, &7u16.to_le_bytes()],
    )
    .unwrap();

    assert_eq!(address, controller_7());
    assert_eq!(bump, 255);
    assert_eq!(
        derive::controller(&programs::ALM_CONTROLLER_MAINNET, 7).unwrap(),
        controller_7()
    );
}

#[test]
fn controller_seeds_under_the_token_program() {
    let (address, bump) = derive::find_address_with_bump(
        &programs::SPL_TOKEN,
        &[b"controller", &7u16.to_le_bytes()],
    )
    .unwrap();

    assert_eq!(address, key("HPzEdeFWJMRQYswVF7rKMeLofb5wCaRj1vJ2w6HN43du"));
    assert_eq!(bump, 253);
}

#[test]
fn controller_scoped_addresses() {
    let program = programs::ALM_CONTROLLER_MAINNET;
    let authority = Pubkey::new_from_array([1; 32]);

    assert_eq!(
        derive::controller_authority(&program, &controller_7()).unwrap(),
        key("GEoqvf4m1j6pyGkpsdzRyYoXCEsFx6QopNowVN9gGXiE")
    );
    assert_eq!(
        derive::permission(&program, &controller_7(), &authority).unwrap(),
        key("BzmhVXageSwPMrXJRtZPGUJsSuFqYwUWbNu3suRaeHSb")
    );
    assert_eq!(
        derive::reserve(&program, &controller_7(), &key(USDC)).unwrap(),
        key("2Y7VrPJm22XqfWDxrPxRyFnoNLoJhtDhssCaLJNt5P17")
    );
    assert_eq!(
        derive::oracle(&program, &Pubkey::new_from_array([2; 32])).unwrap(),
        key("8SZt1Vqs17YzHzXMi2wAv3YcKk1J2avKsTp1p17zxCks")
    );
}

#[test]
fn reserve_vault_matches_associated_token_program() {
    let builder = ControllerIxBuilder::from_id(
        ProgramIds::default(),
        7,
        Pubkey::new_from_array([1; 32]),
    )
    .unwrap();
    let vault = builder
        .reserve_vault(&key(USDC), &programs::SPL_TOKEN)
        .unwrap();

    assert_eq!(vault, key("HXJfGMZ2MSgJC5a24ZPfyuF1z2aLNJuKjRSQ5TpjwHhY"));
    assert_eq!(
        vault,
        spl_associated_token_account::get_associated_token_address_with_program_id(
            &builder.controller_authority(),
            &key(USDC),
            &spl_token::ID,
        )
    );
}

#[test]
fn well_known_program_ids() {
    assert_eq!(programs::SPL_TOKEN, spl_token::ID);
    assert_eq!(programs::ASSOCIATED_TOKEN, spl_associated_token_account::ID);
    assert_eq!(programs::SYSTEM, solana_sdk::system_program::ID);
}

#[test]
fn atomic_swap_config_hash_and_address() {
    let config = IntegrationConfig::AtomicSwap(AtomicSwapConfig {
        input_token: key(USDC),
        output_token: key(WSOL),
        oracle: Pubkey::new_from_array([3; 32]),
        max_slippage_bps: 50,
        max_staleness: 100,
        input_mint_decimals: 6,
        output_mint_decimals: 9,
        expiry_timestamp: 1_700_000_000,
        oracle_price_inverted: false,
        padding: Padding::zeroed(),
    });

    let hash = config.hash().unwrap();
    assert_eq!(
        hash,
        [
            43, 72, 114, 7, 46, 25, 218, 72, 202, 101, 170, 138, 230, 133, 87, 112, 134, 241, 212,
            226, 145, 148, 147, 213, 15, 145, 166, 180, 104, 186, 230, 128
        ]
    );

    let (address, bump) = derive::find_address_with_bump(
        &programs::ALM_CONTROLLER_MAINNET,
        &[seeds::INTEGRATION, controller_7().as_ref(), &hash],
    )
    .unwrap();
    assert_eq!(address, key("DnSsyVGr3dEmfxihi3awUnsoj7rMkCwDFLWZSKpGBXHB"));
    assert_eq!(bump, 254);
}

#[test]
fn drift_accounts() {
    let (signer, nonce) = drift::signer(&programs::DRIFT).unwrap();
    assert_eq!(signer, key("JCNCMFXo5M5qwUPg2Utu1u6YWp3MbygxqBsBeXXJfrw"));
    assert_eq!(nonce, 254);

    assert_eq!(
        drift::state(&programs::DRIFT).unwrap(),
        key("5zpq7DvB6UdFFvpmBPspGPNfUGoBRRCE2HHg5u3gxcsN")
    );
    assert_eq!(
        drift::spot_market(&programs::DRIFT, 0).unwrap(),
        key("6gMq3mRCKf8aP3ttTyYhuijVZ2LGi14oDsBbkgubfLB3")
    );

    let controller_authority = key("GEoqvf4m1j6pyGkpsdzRyYoXCEsFx6QopNowVN9gGXiE");
    assert_eq!(
        drift::user(&programs::DRIFT, &controller_authority, 0).unwrap(),
        key("6eJonzVfyLaiQi6ciuxpJF8f8mHeiyNVJd9sUhSQajM1")
    );
}

#[test]
fn kamino_accounts() {
    let market = key("7u3HeHxYDLhnCoErrtycNokbQYbWGzLs6JSDqGAv5PfF");
    let controller_authority = key("GEoqvf4m1j6pyGkpsdzRyYoXCEsFx6QopNowVN9gGXiE");

    assert_eq!(
        kamino::lending_market_authority(&programs::KAMINO_LEND, &market).unwrap(),
        key("9DrvZvyWh1HuAoZxvYWMvkf2XCzryCpGgHqrMjyDWpmo")
    );
    assert_eq!(
        kamino::vanilla_obligation(&programs::KAMINO_LEND, 0, &controller_authority, &market)
            .unwrap(),
        key("Gx6PY2gPNYmWbvKxSRLSELE8PqybHbWHrztwRjRHwevS")
    );
}

#[test]
fn initialize_reserve_for_controller_7() {
    use alm_instructions::common::{RateLimit, ReserveStatus};

    let builder = ControllerIxBuilder::from_id(
        ProgramIds::default(),
        7,
        Pubkey::new_from_array([1; 32]),
    )
    .unwrap();
    let ix = builder
        .initialize_reserve(
            &key(USDC),
            &programs::SPL_TOKEN,
            ReserveStatus::Active,
            RateLimit::new(1_000_000, 10_000_000),
        )
        .unwrap();

    let keys: Vec<_> = ix.accounts.iter().map(|a| a.pubkey).collect();
    assert_eq!(
        keys,
        vec![
            Pubkey::new_from_array([1; 32]),
            controller_7(),
            key("GEoqvf4m1j6pyGkpsdzRyYoXCEsFx6QopNowVN9gGXiE"),
            Pubkey::new_from_array([1; 32]),
            key("BzmhVXageSwPMrXJRtZPGUJsSuFqYwUWbNu3suRaeHSb"),
            key("2Y7VrPJm22XqfWDxrPxRyFnoNLoJhtDhssCaLJNt5P17"),
            key(USDC),
            key("HXJfGMZ2MSgJC5a24ZPfyuF1z2aLNJuKjRSQ5TpjwHhY"),
            programs::SPL_TOKEN,
            programs::ASSOCIATED_TOKEN,
            programs::ALM_CONTROLLER_MAINNET,
            programs::SYSTEM,
        ]
    );

    let mut data = vec![4, 1];
    data.extend_from_slice(&1_000_000u64.to_le_bytes());
    data.extend_from_slice(&10_000_000u64.to_le_bytes());
    assert_eq!(ix.data, data);
}
