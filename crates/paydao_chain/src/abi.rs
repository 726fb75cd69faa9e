use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};

use crate::error::GatewayError;
use crate::types::Address;

const WORD: usize = 32;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

// ---------------------------------------------------------------------------
// Contract surface
// ---------------------------------------------------------------------------

/// Functions of the `PrivatePayDAO` contract this dashboard calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractFunction {
    AddContributor,
    VerifyContribution,
    ClaimReward,
    DepositToTreasury,
    WithdrawFromTreasury,
    GetTreasuryInfo,
}

impl ContractFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddContributor => "addContributor",
            Self::VerifyContribution => "verifyContribution",
            Self::ClaimReward => "claimReward",
            Self::DepositToTreasury => "depositToTreasury",
            Self::WithdrawFromTreasury => "withdrawFromTreasury",
            Self::GetTreasuryInfo => "getTreasuryInfo",
        }
    }

    /// Canonical signature used for the selector.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::AddContributor => "addContributor(string,address)",
            Self::VerifyContribution => "verifyContribution(uint256,bool)",
            Self::ClaimReward => "claimReward(uint256)",
            Self::DepositToTreasury => "depositToTreasury()",
            Self::WithdrawFromTreasury => "withdrawFromTreasury(uint256)",
            Self::GetTreasuryInfo => "getTreasuryInfo()",
        }
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, Self::DepositToTreasury)
    }

    pub fn is_view(&self) -> bool {
        matches!(self, Self::GetTreasuryInfo)
    }

    pub fn selector(&self) -> [u8; 4] {
        selector(self.signature())
    }
}

/// JSON ABI of `PrivatePayDAO`, the shape wallet tooling expects.
pub fn contract_abi() -> serde_json::Value {
    serde_json::json!([
        {
            "type": "constructor",
            "inputs": [
                { "internalType": "address", "name": "_verifier", "type": "address" }
            ],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "addContributor",
            "inputs": [
                { "internalType": "string", "name": "_name", "type": "string" },
                { "internalType": "address", "name": "_walletAddress", "type": "address" }
            ],
            "outputs": [{ "internalType": "uint256", "name": "", "type": "uint256" }],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "verifyContribution",
            "inputs": [
                { "internalType": "uint256", "name": "contributionId", "type": "uint256" },
                { "internalType": "bool", "name": "isVerified", "type": "bool" }
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "claimReward",
            "inputs": [
                { "internalType": "uint256", "name": "rewardId", "type": "uint256" }
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "depositToTreasury",
            "inputs": [],
            "outputs": [],
            "stateMutability": "payable"
        },
        {
            "type": "function",
            "name": "withdrawFromTreasury",
            "inputs": [
                { "internalType": "uint256", "name": "amount", "type": "uint256" }
            ],
            "outputs": [],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "getTreasuryInfo",
            "inputs": [],
            "outputs": [
                { "internalType": "uint256", "name": "balance", "type": "uint256" },
                { "internalType": "uint256", "name": "totalDeposited", "type": "uint256" },
                { "internalType": "uint256", "name": "totalWithdrawn", "type": "uint256" }
            ],
            "stateMutability": "view"
        }
    ])
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// A Solidity value this contract's calls need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    /// `uint256` restricted to the `u128` range.
    Uint(u128),
    Bool(bool),
    String(String),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn static_word(token: &Token) -> [u8; WORD] {
    match token {
        Token::Address(addr) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(addr.as_bytes());
            word
        }
        Token::Uint(value) => uint_word(*value),
        Token::Bool(flag) => uint_word(u128::from(*flag)),
        Token::String(_) => [0u8; WORD],
    }
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// ABI-encode a tuple of tokens: static values inline in the head, dynamic
/// values as an offset in the head pointing at `length || data` in the tail.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            let offset = (head_len + tail.len()) as u128;
            head.extend_from_slice(&uint_word(offset));
            if let Token::String(text) = token {
                let bytes = text.as_bytes();
                tail.extend_from_slice(&uint_word(bytes.len() as u128));
                tail.extend_from_slice(bytes);
                tail.resize(tail.len() + padded_len(bytes.len()) - bytes.len(), 0);
            }
        } else {
            head.extend_from_slice(&static_word(token));
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Selector followed by the encoded arguments.
pub fn encode_call(function: ContractFunction, args: &[Token]) -> Vec<u8> {
    let mut data = function.selector().to_vec();
    data.extend_from_slice(&encode(args));
    data
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode `count` leading `uint256` words that must fit in `u128`.
pub fn decode_uints(data: &[u8], count: usize) -> Result<Vec<u128>, GatewayError> {
    if data.len() < count * WORD {
        return Err(GatewayError::Decode(format!(
            "return data: expected {} bytes, got {}",
            count * WORD,
            data.len()
        )));
    }

    data.chunks_exact(WORD)
        .take(count)
        .map(|word| {
            let (high, low) = word.split_at(16);
            if high.iter().any(|b| *b != 0) {
                return Err(GatewayError::Decode(
                    "uint256 value exceeds 128 bits".to_string(),
                ));
            }
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(low);
            Ok(u128::from_be_bytes(bytes))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matches_known_erc20_values() {
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
    }

    #[test]
    fn abi_lists_constructor_and_six_functions() {
        let abi = contract_abi();
        let entries = abi.as_array().unwrap();
        assert_eq!(entries.len(), 7);

        let functions: Vec<&str> = entries
            .iter()
            .filter_map(|e| e.get("name").and_then(|n| n.as_str()))
            .collect();
        for f in [
            ContractFunction::AddContributor,
            ContractFunction::VerifyContribution,
            ContractFunction::ClaimReward,
            ContractFunction::DepositToTreasury,
            ContractFunction::WithdrawFromTreasury,
            ContractFunction::GetTreasuryInfo,
        ] {
            assert!(functions.contains(&f.name()), "missing {}", f.name());
        }
    }

    #[test]
    fn only_deposit_is_payable() {
        assert!(ContractFunction::DepositToTreasury.is_payable());
        assert!(!ContractFunction::WithdrawFromTreasury.is_payable());
        assert!(ContractFunction::GetTreasuryInfo.is_view());
    }

    #[test]
    fn encodes_static_words() {
        let addr: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();
        let encoded = encode(&[Token::Uint(7), Token::Bool(true), Token::Address(addr)]);

        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 7);
        assert_eq!(encoded[63], 1);
        assert_eq!(encoded[95], 0xff);
        assert!(encoded[..31].iter().all(|b| *b == 0));
    }

    #[test]
    fn encodes_string_in_tail() {
        let addr: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let encoded = encode(&[Token::String("Zed".into()), Token::Address(addr)]);

        // head: offset + address, tail: length + one padded data word
        assert_eq!(encoded.len(), 128);
        assert_eq!(encoded[31], 0x40);
        assert_eq!(&encoded[44..64], addr.as_bytes());
        assert_eq!(encoded[95], 3);
        assert_eq!(&encoded[96..99], b"Zed");
        assert!(encoded[99..].iter().all(|b| *b == 0));
    }

    #[test]
    fn empty_string_has_length_word_only() {
        let encoded = encode(&[Token::String(String::new())]);
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 0x20);
        assert!(encoded[32..].iter().all(|b| *b == 0));
    }

    #[test]
    fn encode_call_prefixes_selector() {
        let data = encode_call(ContractFunction::ClaimReward, &[Token::Uint(3)]);
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &selector("claimReward(uint256)"));
        assert_eq!(data[35], 3);

        let deposit = encode_call(ContractFunction::DepositToTreasury, &[]);
        assert_eq!(deposit.len(), 4);
    }

    #[test]
    fn decode_uints_reads_words() {
        let mut data = Vec::new();
        data.extend_from_slice(&uint_word(10));
        data.extend_from_slice(&uint_word(20));
        assert_eq!(decode_uints(&data, 2).unwrap(), vec![10, 20]);
    }

    #[test]
    fn decode_uints_rejects_short_or_wide_data() {
        assert!(decode_uints(&[0u8; 31], 1).is_err());
        let mut wide = [0u8; 32];
        wide[0] = 1;
        assert!(decode_uints(&wide, 1).is_err());
    }
}
