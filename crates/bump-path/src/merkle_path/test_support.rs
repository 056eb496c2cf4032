//! Shared fixtures for the merkle path unit tests.

use std::collections::BTreeSet;

use bump_primitives::chainhash::{double_hash_h, Hash};

use super::{MerklePath, PathElement};
use crate::merkle_tree_parent::merkle_tree_parent;

pub const BRC74_HEX: &str = "fe8a6a0c000c04fde80b0011774f01d26412f0d16ea3f0447be0b5ebec67b0782e321a7a01cbdf7f734e30fde90b02004e53753e3fe4667073063a17987292cfdea278824e9888e52180581d7188d8fdea0b025e441996fc53f0191d649e68a200e752fb5f39e0d5617083408fa179ddc5c998fdeb0b0102fdf405000671394f72237d08a4277f4435e5b6edf7adc272f25effef27cdfe805ce71a81fdf50500262bccabec6c4af3ed00cc7a7414edea9c5efa92fb8623dd6160a001450a528201fdfb020101fd7c010093b3efca9b77ddec914f8effac691ecb54e2c81d0ab81cbc4c4b93befe418e8501bf01015e005881826eb6973c54003a02118fe270f03d46d02681c8bc71cd44c613e86302f8012e00e07a2bb8bb75e5accff266022e1e5e6e7b4d6d943a04faadcf2ab4a22f796ff30116008120cafa17309c0bb0e0ffce835286b3a2dcae48e4497ae2d2b7ced4f051507d010a00502e59ac92f46543c23006bff855d96f5e648043f0fb87a7a5949e6a9bebae430104001ccd9f8f64f4d0489b30cc815351cf425e0e78ad79a589350e4341ac165dbe45010301010000af8764ce7e1cc132ab5ed2229a005c87201c9a5ee15c0f91dd53eff31ab30cd4";
pub const BRC74_ROOT: &str = "57aab6e6fb1b697174ffb64e062c4728f2ffd33ddcfa02a43b64d8cd29b483b4";
pub const BRC74_HEIGHT: u32 = 813706;
pub const BRC74_TXID1: &str = "304e737fdfcb017a1a322e78b067ecebb5e07b44f0a36ed1f01264d2014f7711";
pub const BRC74_TXID2: &str = "d888711d588021e588984e8278a2decf927298173a06737066e43f3e75534e00";
pub const BRC74_TXID3: &str = "98c9c5dd79a18f40837061d5e0395ffb52e700a2689e641d19f053fc9619445e";

fn h(display_hex: &str) -> Hash {
    Hash::from_hex(display_hex).unwrap()
}

/// The reference path in structured form.
pub fn brc74_path() -> MerklePath {
    MerklePath::new(
        BRC74_HEIGHT,
        vec![
            vec![
                PathElement::hashed(3048, h(BRC74_TXID1)),
                PathElement::target(3049, h(BRC74_TXID2)),
                PathElement::target(3050, h(BRC74_TXID3)),
                PathElement::duplicate(3051),
            ],
            vec![
                PathElement::hashed(1524, h("811ae75c80fecd27efff5ef272c2adf7edb6e535447f27a4087d23724f397106")),
                PathElement::hashed(1525, h("82520a4501a06061dd2386fb92fa5e9ceaed14747acc00edf34a6cecabcc2b26")),
            ],
            vec![PathElement::duplicate(763)],
            vec![PathElement::hashed(380, h("858e41febe934b4cbc1cb80a1dc8e254cb1e69acff8e4f91ecdd779bcaefb393"))],
            vec![PathElement::duplicate(191)],
            vec![PathElement::hashed(94, h("f80263e813c644cd71bcc88126d0463df070e28f11023a00543c97b66e828158"))],
            vec![PathElement::hashed(46, h("f36f792fa2b42acfadfa043a946d4d7b6e5e1e2e0266f2cface575bbb82b7ae0"))],
            vec![PathElement::hashed(22, h("7d5051f0d4ceb7d2e27a49e448aedca2b3865283ceffe0b00b9c3017faca2081"))],
            vec![PathElement::hashed(10, h("43aeeb9b6a9e94a5a787fbf04380645e6fd955f8bf0630c24365f492ac592e50"))],
            vec![PathElement::hashed(4, h("45be5d16ac41430e3589a579ad780e5e42cf515381cc309b48d0f4648f9fcd1c"))],
            vec![PathElement::duplicate(3)],
            vec![PathElement::hashed(0, h("d40cb31af3ef53dd910f5ce15e9a1c20875c009a22d25eab32c11c7ece6487af"))],
        ],
    )
}

/// A deterministic stand-in txid.
pub fn leaf(n: u64) -> Hash {
    double_hash_h(&n.to_le_bytes())
}

/// Every level of the full tree over `leaves`, leaves first, root last.
pub fn tree_levels(leaves: &[Hash]) -> Vec<Vec<Hash>> {
    let mut levels = vec![leaves.to_vec()];
    while levels.last().map_or(0, Vec::len) > 1 {
        let below = levels.last().unwrap();
        let above = below
            .chunks(2)
            .map(|pair| merkle_tree_parent(&pair[0], pair.get(1).unwrap_or(&pair[0])))
            .collect();
        levels.push(above);
    }
    levels
}

/// Build the path proving `targets` within the block made of `leaves`.
///
/// At every level the sibling of each target's ancestor is stored, as a
/// duplicate when it falls past the end of an odd-sized level.
pub fn block_proof(block_height: u32, leaves: &[Hash], targets: &[u64]) -> MerklePath {
    let levels = tree_levels(leaves);
    let mut path = Vec::new();
    for (height, nodes) in levels.iter().enumerate().take(levels.len() - 1) {
        let mut wanted = BTreeSet::new();
        for t in targets {
            let ancestor = t >> height;
            if height == 0 {
                wanted.insert(ancestor);
            }
            wanted.insert(ancestor ^ 1);
        }
        let level = wanted
            .into_iter()
            .map(|offset| match nodes.get(offset as usize) {
                Some(hash) if height == 0 && targets.contains(&offset) => {
                    PathElement::target(offset, *hash)
                }
                Some(hash) => PathElement::hashed(offset, *hash),
                None => PathElement::duplicate(offset),
            })
            .collect();
        path.push(level);
    }
    MerklePath::new(block_height, path)
}
