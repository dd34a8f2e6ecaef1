//! Type enum and base type chart generation.

use crate::helpers::{to_lookup_key, to_valid_ident};
use crate::models::TypeChartEntry;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::{fs, writeln};

/// Generate Type enum and type chart
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json = fs::read_to_string(data_dir.join("typechart.json")).expect("typechart.json");
    let chart: BTreeMap<String, TypeChartEntry> =
        serde_json::from_str(&json).expect("parse typechart");

    // Canonical type order (alphabetical, matching JSON keys)
    let type_names: Vec<&str> = chart.keys().map(|s| s.as_str()).collect();
    let type_count = type_names.len();

    let idents: Vec<proc_macro2::Ident> = type_names
        .iter()
        .map(|name| format_ident!("{}", to_valid_ident(name)))
        .collect();

    let variants: Vec<TokenStream> = idents
        .iter()
        .enumerate()
        .map(|(i, ident)| {
            let idx = i as u8;
            quote! { #ident = #idx }
        })
        .collect();

    let name_arms: Vec<TokenStream> = idents
        .iter()
        .zip(type_names.iter())
        .map(|(ident, name)| {
            let key = to_lookup_key(name);
            quote! { Type::#ident => #key }
        })
        .collect();

    // Matrix[defender][attacker] = damage code
    let matrix_rows: Vec<TokenStream> = type_names
        .iter()
        .map(|def_name| {
            let entry = &chart[*def_name];
            let cells: Vec<TokenStream> = type_names
                .iter()
                .map(|atk_name| {
                    let atk_key = to_valid_ident(atk_name);
                    let code = entry.damage_taken.get(&atk_key).copied().unwrap_or(0);
                    let ident = match code {
                        1 => format_ident!("SuperEffective"),
                        2 => format_ident!("Resisted"),
                        3 => format_ident!("DoubleResisted"),
                        _ => format_ident!("Neutral"),
                    };
                    quote! { TypeEffectiveness::#ident }
                })
                .collect();
            quote! { [#(#cells),*] }
        })
        .collect();

    let code = quote! {
        /// Elemental type
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize
        )]
        #[serde(rename_all = "lowercase")]
        #[repr(u8)]
        pub enum Type {
            #(#variants),*
        }

        impl Type {
            /// Total number of types
            pub const COUNT: usize = #type_count;

            /// All types in index order
            pub const ALL: [Type; #type_count] = [#(Type::#idents),*];

            /// Parse type from string (case-insensitive)
            #[inline]
            pub fn from_str(s: &str) -> Option<Self> {
                TYPE_LOOKUP.get(s.trim().to_ascii_lowercase().as_str()).copied()
            }

            /// Lowercase display name
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            /// Dense index (0..COUNT)
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Type at a dense index
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
        }

        impl core::fmt::Display for Type {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }

        /// Single-type damage tier
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[repr(u8)]
        pub enum TypeEffectiveness {
            /// 1.0x damage
            Neutral = 0,
            /// 1.6x damage
            SuperEffective = 1,
            /// 0.625x damage
            Resisted = 2,
            /// 0.390625x damage (the "immune" tier)
            DoubleResisted = 3,
        }

        impl TypeEffectiveness {
            /// Damage multiplier for this tier
            #[inline]
            pub const fn multiplier(self) -> f64 {
                match self {
                    Self::Neutral => 1.0,
                    Self::SuperEffective => 1.6,
                    Self::Resisted => 0.625,
                    Self::DoubleResisted => 0.390625,
                }
            }
        }

        /// Base type chart: TYPE_CHART[defender][attacker] = tier
        pub static TYPE_CHART: [[TypeEffectiveness; #type_count]; #type_count] = [
            #(#matrix_rows),*
        ];

        /// Single-type multiplier for an attack
        #[inline]
        pub fn type_effectiveness(attacker: Type, defender: Type) -> f64 {
            TYPE_CHART[defender as usize][attacker as usize].multiplier()
        }
    };

    // phf map for string -> Type lookup
    let keys: Vec<String> = type_names.iter().map(|name| to_lookup_key(name)).collect();
    let mut phf_map = phf_codegen::Map::new();
    for (key, ident) in keys.iter().zip(idents.iter()) {
        phf_map.entry(key.as_str(), &format!("Type::{}", ident));
    }
    let phf_str = phf_map.build().to_string();

    let dest = out_dir.join("types.rs");
    let mut file = BufWriter::new(File::create(&dest).expect("create types.rs"));
    writeln!(file, "{}", code).unwrap();
    writeln!(file).unwrap();
    writeln!(
        file,
        "static TYPE_LOOKUP: phf::Map<&'static str, Type> = {};",
        phf_str
    )
    .unwrap();
}
