//! Built-in reaction rule library.
//!
//! Condition-level knowledge lives entirely in the pattern sources:
//! role patterns select compatible reactants, alert patterns mark
//! functional groups the reaction conditions do not tolerate.

use crate::rules::{Role, RuleDefinition, TemplateSpec};

fn fischer_esterification() -> RuleDefinition {
    RuleDefinition::new(
        "fischer-esterification",
        "Esters formation from alcohols and acids",
    )
    .template(
        TemplateSpec::new("[A:1]-[A:3]")
            .role(Role::A, ["[O;D1;x0;z1:2]-[C;x2;z2:1]=[O;M]"])
            .role(Role::B, ["[O;D1;x0;z1:3]-[C;x1;z1;M]"])
            // thiols and [thia]phenols interfere
            .alert("[S;D1;x0;z1][C;x1;z1]")
            .alert("[O,S;D1;z1][A;a]"),
    )
}

fn amidation() -> RuleDefinition {
    RuleDefinition::new("amidation", "Amidation Reaction")
        .template(
            TemplateSpec::new("[A:2]-[A:4]")
                .role(Role::A, ["[O;x0;z2;M]=[C;x2:2][O;D1:3]"])
                .role(
                    Role::B,
                    [
                        "[N;D1:4][C;a;M]",
                        "[N;D1:4][C;z1;x1;M]",
                        "[N;D2:4]([C;a;M])[C;a;M]",
                        "[N;D2:4]([C;a;M])[C;z1;x1;M]",
                        "[N;D2:4]([C;z1;x1;M])[C;z1;x1;M]",
                    ],
                ),
        )
        .alert("[C;z1;x1]-[O;D1]")
        .alert("[C,N;a]-[O;D1]")
}

fn reductive_amination() -> RuleDefinition {
    RuleDefinition::new(
        "reductive-amination",
        "Amine carbonyl reductive amination reaction",
    )
    .template(
        TemplateSpec::new("[A:1]-[A:3]")
            .role(Role::A, ["[O:2]=[C;x1;z2:1]"])
            .role(
                Role::B,
                [
                    "[N;D1:3][C;a;M]",
                    "[N;D1:3][C;z1;x1;M]",
                    "[N;D2:3]([C;a;M])[C;z1;x1;M]",
                    "[N;D2:3]([C;z1;x1;M])[C;z1;x1;M]",
                ],
            ),
    )
}

fn suzuki_miyaura() -> RuleDefinition {
    RuleDefinition::new("suzuki-miyaura", "Suzuki-Miyaura C-C coupling reaction")
        .template(
            TemplateSpec::new("[A:2]-[A:3]")
                .role(Role::A, ["[Cl,Br,I;D1:1]-[C;a:2]"])
                .role(
                    Role::B,
                    ["[B;D3;z1:4]-[C;a:3]", "[B;D3;z1:4]-[C;z2:3]=[C;z2:M]"],
                ),
        )
        .template(
            TemplateSpec::new("[A:2]-[A:3]")
                .role(Role::A, ["[Cl,Br,I;D1:2]-[C;x1;z2:1]"])
                .role(Role::B, ["[C;x1;z2:3]-[B;D3;z1:4]"]),
        )
}

fn suzuki_miyaura_amide() -> RuleDefinition {
    RuleDefinition::new(
        "suzuki-miyaura-amide",
        "Suzuki-Miyaura C-N coupling reaction",
    )
    .template(
        TemplateSpec::new("[A:2]-[A:3]")
            .role(Role::A, ["[B;D3;z2:1]([O;z1])([O;z1])-[C;a:2]"])
            .role(
                Role::B,
                ["[C;a;M]-[C:3](=[O;M])-N([C;x1;z1])-C(=O)[C;x0;z1]"],
            ),
    )
}

fn buchwald_hartwig() -> RuleDefinition {
    RuleDefinition::new(
        "buchwald-hartwig",
        "Buchwald-Hartwig amination reaction, C-N coupling reaction",
    )
    .template(
        TemplateSpec::new("[A:2]-[A:3]")
            .role(Role::A, ["[Cl,Br,I;D1:1]-[C;a:2]"])
            .role(
                Role::B,
                [
                    "[N;D1:3][C;a;M]",
                    "[N;D1:3][C;z1;x1;M]",
                    "[N;D2:3]([C;a;M])[C;z1;x1;M]",
                    "[N;D2:3]([C;z1;x1;M])[C;z1;x1;M]",
                ],
            ),
    )
}

fn sulfonamidation() -> RuleDefinition {
    RuleDefinition::new(
        "sulfonamidation",
        "Sulfoamination reaction, S-N coupling reaction",
    )
    .template(
        TemplateSpec::new("[A:2]-[A:6]")
            .role(Role::A, ["[O,F,Cl,Br,I;D1;]-[S:2](=[O;M])([C;M])=[O;M]"])
            .role(
                Role::B,
                [
                    "[N;D1:6][C;a;M]",
                    "[N;D1:6][C;z1;x1;M]",
                    "[N;D1:6][C;z1;x1;M]",
                    "[N;D2:6]([C;a;M:7])[C;a;M]",
                    "[N;D2:6]([C;z1;x1;M:7])[C;z1;x1;M]",
                    "[N;a;h1:6]",
                ],
            ),
    )
}

fn amine_isocyanate() -> RuleDefinition {
    RuleDefinition::new(
        "amine-isocyanate",
        "Amine with isocyanate reaction, C-N coupling reaction",
    )
    .template(
        TemplateSpec::new("[A:1][A:2]-[A:3]")
            .role(Role::A, ["[C;M][N:1]=[C:2]=[O;M]"])
            .role(
                Role::B,
                [
                    "[N;D1:3][C;a;M]",
                    "[N;D1:3][C;z1;x1;M]",
                    "[N;D2:3]([C;a;M])[C;a;M]",
                    "[N;D2:3]([C;a;M])[C;z1;x1;M]",
                    "[N;D2:3]([C;z1;x1;M])[C;z1;x1;M]",
                ],
            ),
    )
}

fn sonogashira() -> RuleDefinition {
    RuleDefinition::new(
        "sonogashira",
        "Sonogashira C-C coupling reaction over a palladium catalyst with \
         copper co-catalyst",
    )
    .template(
        TemplateSpec::new("[A:1]-[A:3]")
            .role(Role::A, ["[C;D2;M]#[C;D1:3]"])
            .role(
                Role::B,
                [
                    "[C;a:1]-[Cl,Br,I;D1;M]",
                    "[C;x1;z2:1]-[Cl,Br,I;D1;M]",
                    "[C;x2:1](=[O;M])-[Cl,Br,I;D1;M]",
                ],
            ),
    )
}

/// All predefined rule definitions, validated by construction.
pub fn built_in_definitions() -> Vec<RuleDefinition> {
    vec![
        fischer_esterification(),
        amidation(),
        reductive_amination(),
        suzuki_miyaura(),
        suzuki_miyaura_amide(),
        buchwald_hartwig(),
        sulfonamidation(),
        amine_isocyanate(),
        sonogashira(),
    ]
}
