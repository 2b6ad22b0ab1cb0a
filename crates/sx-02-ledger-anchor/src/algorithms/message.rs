//! # Memo Transactions
//!
//! Legacy message format:
//!
//! ```text
//! Transaction = compact_u16(#sigs) ‖ sig[64]* ‖ Message
//! Message     = header[3] ‖ compact_u16(#keys) ‖ key[32]* ‖ blockhash[32]
//!             ‖ compact_u16(#ix) ‖ Instruction*
//! Instruction = program_idx ‖ compact_u16(#accts) ‖ idx* ‖ compact_u16(len) ‖ data
//! ```
//!
//! Account keys are ordered writable signers, read-only signers, writable
//! non-signers, read-only non-signers; the fee payer is always first.

use crate::domain::{Blockhash, SigningIdentity, MEMO_PROGRAM_ID};
use shared_crypto::{Address, Ed25519Signature};

/// Largest serialized transaction the network accepts.
pub const PACKET_DATA_SIZE: usize = 1232;

/// Account reference inside an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// A program invocation before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// Memo instruction: one read-only signer (the authority), opaque data.
pub fn memo_instruction(authority: Address, memo: Vec<u8>) -> Instruction {
    Instruction {
        program_id: MEMO_PROGRAM_ID,
        accounts: vec![AccountMeta {
            pubkey: authority,
            is_signer: true,
            is_writable: false,
        }],
        data: memo,
    }
}

/// Signature and read-only counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// Instruction with accounts replaced by key indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// A compiled legacy message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Address>,
    pub recent_blockhash: Blockhash,
    pub instructions: Vec<CompiledInstruction>,
}

#[derive(Clone, Copy)]
struct KeyFlags {
    pubkey: Address,
    is_signer: bool,
    is_writable: bool,
}

impl Message {
    /// Compile instructions with `payer` as the writable, signing fee payer.
    pub fn new(instructions: &[Instruction], payer: Address, recent_blockhash: Blockhash) -> Self {
        let mut keys: Vec<KeyFlags> = vec![KeyFlags {
            pubkey: payer,
            is_signer: true,
            is_writable: true,
        }];
        let mut merge = |pubkey: Address, is_signer: bool, is_writable: bool| {
            match keys.iter_mut().find(|k| k.pubkey == pubkey) {
                Some(existing) => {
                    existing.is_signer |= is_signer;
                    existing.is_writable |= is_writable;
                }
                None => keys.push(KeyFlags {
                    pubkey,
                    is_signer,
                    is_writable,
                }),
            }
        };
        for ix in instructions {
            for meta in &ix.accounts {
                merge(meta.pubkey, meta.is_signer, meta.is_writable);
            }
            merge(ix.program_id, false, false);
        }

        // Stable sort keeps the payer first among writable signers.
        keys.sort_by_key(|k| match (k.is_signer, k.is_writable) {
            (true, true) => 0u8,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        });

        let count = |signer: bool, writable: bool| {
            keys.iter()
                .filter(|k| k.is_signer == signer && k.is_writable == writable)
                .count() as u8
        };
        let header = MessageHeader {
            num_required_signatures: keys.iter().filter(|k| k.is_signer).count() as u8,
            num_readonly_signed_accounts: count(true, false),
            num_readonly_unsigned_accounts: count(false, false),
        };

        let account_keys: Vec<Address> = keys.iter().map(|k| k.pubkey).collect();
        let index_of = |pubkey: &Address| {
            account_keys
                .iter()
                .position(|k| k == pubkey)
                .unwrap_or_default() as u8
        };
        let instructions = instructions
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: index_of(&ix.program_id),
                accounts: ix.accounts.iter().map(|m| index_of(&m.pubkey)).collect(),
                data: ix.data.clone(),
            })
            .collect();

        Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        }
    }

    /// Wire bytes that get signed.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(256);
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);

        encode_length(&mut out, self.account_keys.len());
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }
        out.extend_from_slice(&self.recent_blockhash.0);

        encode_length(&mut out, self.instructions.len());
        for ix in &self.instructions {
            out.push(ix.program_id_index);
            encode_length(&mut out, ix.accounts.len());
            out.extend_from_slice(&ix.accounts);
            encode_length(&mut out, ix.data.len());
            out.extend_from_slice(&ix.data);
        }
        out
    }
}

/// A signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<Ed25519Signature>,
    pub message: Message,
}

impl Transaction {
    /// Sign a single-signer message with the fee payer identity.
    pub fn sign(message: Message, identity: &SigningIdentity) -> Self {
        let signature = identity.sign(&message.serialize());
        Self {
            signatures: vec![signature],
            message,
        }
    }

    /// The first signature identifies the transaction.
    pub fn id(&self) -> Option<&Ed25519Signature> {
        self.signatures.first()
    }

    /// Full wire encoding.
    pub fn serialize(&self) -> Vec<u8> {
        let message = self.message.serialize();
        let mut out = Vec::with_capacity(1 + 64 * self.signatures.len() + message.len());
        encode_length(&mut out, self.signatures.len());
        for signature in &self.signatures {
            out.extend_from_slice(signature.as_bytes());
        }
        out.extend_from_slice(&message);
        out
    }
}

/// compact-u16: 7 bits per byte, high bit set while more bytes follow.
pub fn encode_length(out: &mut Vec<u8>, len: usize) {
    let mut remaining = len;
    loop {
        let mut byte = (remaining & 0x7f) as u8;
        remaining >>= 7;
        if remaining == 0 {
            out.push(byte);
            return;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

/// Inverse of [`encode_length`]; returns the value and bytes consumed.
pub fn decode_length(bytes: &[u8]) -> Option<(usize, usize)> {
    let mut value = 0usize;
    for (i, byte) in bytes.iter().enumerate().take(3) {
        value |= ((byte & 0x7f) as usize) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}
