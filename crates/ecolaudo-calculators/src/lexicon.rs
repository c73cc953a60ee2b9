//! Lexicon point tables.
//!
//! Static mappings from categorical option values to point contributions,
//! per reporting standard (ACR BI-RADS 5th edition, ACR TI-RADS). Kept as
//! data tables rather than literals inside the scoring logic so guideline
//! revisions touch one place.

use serde::Serialize;
use ts_rs::TS;

/// One selectable option of a lexicon axis.
///
/// `value` is the canonical form key; `label` the display text. Within one
/// table every `value` is unique.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export)]
pub struct LexiconEntry {
    pub value: &'static str,
    pub label: &'static str,
    pub points: i32,
    pub description: &'static str,
}

const fn entry(
    value: &'static str,
    label: &'static str,
    points: i32,
    description: &'static str,
) -> LexiconEntry {
    LexiconEntry {
        value,
        label,
        points,
        description,
    }
}

/// Point lookup tolerant of either the canonical value or the display
/// label; first match wins. Absent or unknown input contributes nothing.
pub fn find_points(table: &[LexiconEntry], input: Option<&str>) -> i32 {
    let Some(input) = input else { return 0 };
    table
        .iter()
        .find(|e| e.value == input || e.label == input)
        .map(|e| e.points)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// BI-RADS (breast) lexicons
// ---------------------------------------------------------------------------

pub const BIRADS_SHAPE: &[LexiconEntry] = &[
    entry("oval", "Oval", 0, "Forma ovalada - favorece benignidade"),
    entry("redonda", "Redonda", 0, "Forma redonda - favorece benignidade"),
    entry("irregular", "Irregular", 2, "Forma irregular - suspeito de malignidade"),
];

pub const BIRADS_ORIENTATION: &[LexiconEntry] = &[
    entry(
        "paralela",
        "Paralela à pele",
        0,
        "Eixo maior paralelo à pele - favorece benignidade",
    ),
    entry(
        "nao-paralela",
        "Não-paralela (antiparalela)",
        2,
        "Eixo maior perpendicular à pele - suspeito",
    ),
];

pub const BIRADS_MARGINS: &[LexiconEntry] = &[
    entry(
        "circunscritas",
        "Circunscritas (bem definidas)",
        0,
        "Margens nítidas e bem delimitadas - benigno",
    ),
    entry(
        "indistintas",
        "Indistintas (mal definidas)",
        1,
        "Margens pouco definidas - intermediário",
    ),
    entry("angular", "Angulares", 1, "Margens com ângulos agudos - intermediário"),
    entry(
        "microlobuladas",
        "Microlobuladas",
        2,
        "Pequenas ondulações nas margens - suspeito",
    ),
    entry(
        "espiculadas",
        "Espiculadas",
        3,
        "Espículas radiando da lesão - altamente suspeito",
    ),
];

// Anechoic content and posterior enhancement argue for a simple cyst, hence
// the negative contributions.
pub const BIRADS_ECHO_PATTERN: &[LexiconEntry] = &[
    entry("anecoico", "Anecoico", -1, "Sem ecos internos - favorece cisto simples"),
    entry(
        "hiperecoico",
        "Hiperecoico",
        0,
        "Mais ecogênico que gordura - pode ser gordura",
    ),
    entry("isoecoico", "Isoecoico", 0, "Mesma ecogenicidade da gordura"),
    entry("hipoecoico", "Hipoecoico", 1, "Menos ecogênico que gordura - achado comum"),
    entry("heterogeneo", "Heterogêneo", 1, "Múltiplas ecogenicidades - suspeito"),
    entry("complexo", "Complexo cístico-sólido", 1, "Componentes sólidos e císticos"),
];

pub const BIRADS_POSTERIOR: &[LexiconEntry] = &[
    entry("sem-alteracao", "Sem alteração", 0, "Não há mudanças na transmissão sonora"),
    entry(
        "reforco",
        "Reforço acústico",
        -1,
        "Aumento de ecos posteriores - favorece cisto",
    ),
    entry("sombra", "Sombra acústica", 2, "Atenuação posterior - suspeito de malignidade"),
    entry("combinado", "Padrão combinado", 1, "Reforço e sombra concomitantes"),
];

pub const BIRADS_CALCIFICATIONS: &[LexiconEntry] = &[
    entry("ausentes", "Ausentes", 0, "Sem calcificações visíveis"),
    entry(
        "macro",
        "Macrocalcificações (grosseiras)",
        0,
        "Calcificações grandes - tipicamente benignas",
    ),
    entry(
        "micro",
        "Microcalcificações (puntiformes)",
        2,
        "Calcificações pequenas - suspeitas",
    ),
];

pub const BIRADS_VASCULARITY: &[LexiconEntry] = &[
    entry("ausente", "Ausente", 0, "Sem fluxo detectável ao Doppler"),
    entry("minima", "Mínima (periférica)", 0, "Fluxo periférico escasso"),
    entry("moderada", "Moderada (interna)", 1, "Fluxo interno moderado"),
    entry(
        "acentuada",
        "Acentuada (central penetrante)",
        2,
        "Fluxo central abundante - suspeito",
    ),
];

// ---------------------------------------------------------------------------
// ACR TI-RADS (thyroid) lexicons
// ---------------------------------------------------------------------------

pub const TIRADS_COMPOSITION: &[LexiconEntry] = &[
    entry("cistico", "Cístico ou quase totalmente cístico", 0, ""),
    entry("espongiforme", "Espongiforme", 0, ""),
    entry("misto-cistico", "Misto cístico-sólido", 1, ""),
    entry(
        "solido-coloide",
        "Sólido ou quase totalmente sólido com coloide",
        1,
        "",
    ),
    entry("solido", "Sólido ou quase totalmente sólido", 2, ""),
];

pub const TIRADS_ECHOGENICITY: &[LexiconEntry] = &[
    entry("anecogênico", "Anecogênico", 0, ""),
    entry("hiperecogênico", "Hiperecogênico ou isoecogênico", 1, ""),
    entry("hipoecogênico", "Hipoecogênico", 2, ""),
    entry("muito-hipoecogênico", "Muito hipoecogênico", 3, ""),
];

pub const TIRADS_SHAPE: &[LexiconEntry] = &[
    entry("mais-largo-que-alto", "Mais largo que alto", 0, ""),
    entry("mais-alto-que-largo", "Mais alto que largo", 3, ""),
];

pub const TIRADS_MARGINS: &[LexiconEntry] = &[
    entry("lisas", "Lisas", 0, ""),
    entry("mal-definidas", "Mal definidas", 0, ""),
    entry("lobuladas-irregulares", "Lobuladas ou irregulares", 2, ""),
    entry("extensao-extratiroidea", "Extensão extratiroidea", 3, ""),
];

pub const TIRADS_ECHOGENIC_FOCI: &[LexiconEntry] = &[
    entry("ausentes", "Ausentes ou grandes artefatos em cometa", 0, ""),
    entry("macrocalcificacoes", "Macrocalcificações", 1, ""),
    entry("calcificacoes-perifericas", "Calcificações periféricas (anel)", 2, ""),
    entry("microcalcificacoes", "Microcalcificações puntiformes", 3, ""),
];
