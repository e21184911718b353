use anyhow::Result;
use clap::Parser;
use contract_ops::{
    config::{Command, Config},
    contracts::ContractsClient,
    logging, node,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::setup(config.log_format);
    info!("{:#?}", config);

    let signer = config.signer()?;
    let node = node::Client::new_from_config(&config).await?;
    let contracts = ContractsClient::new(node.clone(), node);

    match config.command {
        Command::Deploy { wasm, gas_limit } => {
            let code_hash = contracts.deploy_code(&signer, &wasm, gas_limit).await?;
            println!("{}", code_hash);
        }
        Command::Instantiate {
            code_hash,
            data,
            endowment,
            gas_limit,
        } => {
            let address = contracts
                .instantiate(&signer, code_hash, data, endowment, gas_limit)
                .await?;
            println!("{}", address);
        }
        Command::Call {
            address,
            data,
            endowment,
            gas_limit,
        } => {
            contracts
                .call_contract(&signer, address, data, gas_limit, endowment)
                .await?;
        }
        Command::Storage { address, key } => {
            match contracts.get_contract_storage(&address, &key.0).await? {
                Some(value) => println!("{}", value),
                None => println!("null"),
            }
        }
    }
    Ok(())
}
