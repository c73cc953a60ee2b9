use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Catalog definition of a finding type, as opposed to a concrete
/// occurrence of it in an exam (see [`super::finding::SelectedFinding`]).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Finding {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_normal: bool,
    #[serde(default)]
    pub has_details: bool,
    #[serde(default)]
    pub has_severity: bool,
    #[serde(default)]
    pub has_measurement: bool,
    #[serde(default)]
    pub has_location: bool,
}

impl Finding {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            is_normal: false,
            has_details: false,
            has_severity: false,
            has_measurement: false,
            has_location: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrganCategory {
    pub id: String,
    pub name: String,
    pub findings: Vec<Finding>,
}

/// An organ (or organ region) of the exam, with its normal-state boilerplate
/// and the catalog of findings that can be reported on it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Organ {
    pub id: String,
    pub name: String,
    pub normal_description: String,
    pub categories: Vec<OrganCategory>,
}

/// Read-only lookup over an organ catalog.
///
/// Supplied by the host per exam type; lookups degrade to the raw id so a
/// stale catalog never aborts report generation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    pub organs: Vec<Organ>,
}

impl Catalog {
    pub fn new(organs: Vec<Organ>) -> Self {
        Self { organs }
    }

    pub fn organ(&self, organ_id: &str) -> Option<&Organ> {
        self.organs.iter().find(|o| o.id == organ_id)
    }

    /// Display name for an organ, falling back to the raw id.
    pub fn organ_name(&self, organ_id: &str) -> String {
        self.organ(organ_id)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| organ_id.to_string())
    }

    /// Display name for a category within an organ, falling back to the raw id.
    pub fn category_name(&self, organ_id: &str, category_id: &str) -> String {
        self.organ(organ_id)
            .and_then(|o| o.categories.iter().find(|c| c.id == category_id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| category_id.to_string())
    }
}

fn breast_side(id: &str, name: &str) -> Organ {
    let normal_finding = Finding {
        id: format!("{id}-normal"),
        name: format!("{name} de aspecto normal"),
        description: "Parênquima mamário com ecotextura habitual".to_string(),
        is_normal: true,
        ..Finding::new("", "", "")
    };

    let mut nodulo = Finding::new("nodulo-solido", "Nódulo sólido", "Lesão nodular sólida");
    nodulo.has_details = true;
    nodulo.has_measurement = true;
    nodulo.has_location = true;

    let mut fibroadenoma = Finding::new(
        "fibroadenoma",
        "Fibroadenoma",
        "Nódulo sólido ovalado de contornos regulares",
    );
    fibroadenoma.has_measurement = true;
    fibroadenoma.has_location = true;

    let mut cisto_simples = Finding::new(
        "cisto-simples",
        "Cisto simples",
        "Lesão cística anecóica com paredes finas",
    );
    cisto_simples.has_measurement = true;
    cisto_simples.has_location = true;

    let mut cisto_complexo = Finding::new(
        "cisto-complexo",
        "Cisto complexo",
        "Lesão cística com componente sólido ou septos",
    );
    cisto_complexo.has_measurement = true;
    cisto_complexo.has_location = true;

    let mut ectasia = Finding::new(
        "ectasia-ductal",
        "Ectasia ductal",
        "Dilatação dos ductos lactíferos",
    );
    ectasia.has_measurement = true;
    ectasia.has_location = true;

    let mut microcalc = Finding::new(
        "microcalcificacoes",
        "Microcalcificações",
        "Focos hiperecogênicos puntiformes",
    );
    microcalc.has_location = true;

    Organ {
        id: id.to_string(),
        name: name.to_string(),
        normal_description: "apresenta parênquima mamário com ecotextura habitual, sem evidências \
                             de nódulos, cistos ou outras lesões focais. Pele e tecido subcutâneo \
                             de espessura normal."
            .to_string(),
        categories: vec![
            OrganCategory {
                id: "achados-normais".to_string(),
                name: "Achados Normais".to_string(),
                findings: vec![normal_finding],
            },
            OrganCategory {
                id: "nodulos".to_string(),
                name: "Nódulos".to_string(),
                findings: vec![nodulo, fibroadenoma],
            },
            OrganCategory {
                id: "cistos".to_string(),
                name: "Cistos".to_string(),
                findings: vec![cisto_simples, cisto_complexo],
            },
            OrganCategory {
                id: "alteracoes-arquiteturais".to_string(),
                name: "Alterações Arquiteturais".to_string(),
                findings: vec![ectasia, microcalc],
            },
        ],
    }
}

/// Built-in catalog for the breast ultrasound exam.
///
/// Hosts with custom exam configurations supply their own [`Catalog`]; this
/// one covers both breasts and the axillary regions.
pub fn breast_catalog() -> Catalog {
    let mut linfonodo = Finding::new(
        "linfonodomegalia",
        "Linfonodomegalia axilar",
        "Linfonodo com perda do hilo gorduroso ou córtex espessado",
    );
    linfonodo.has_measurement = true;
    linfonodo.has_location = true;

    let axilas = Organ {
        id: "axilas".to_string(),
        name: "Axilas".to_string(),
        normal_description: "apresentam linfonodos de morfologia e dimensões habituais, com hilo \
                             gorduroso preservado, sem sinais de linfonodomegalias ou alterações \
                             suspeitas."
            .to_string(),
        categories: vec![OrganCategory {
            id: "linfonodos".to_string(),
            name: "Linfonodos".to_string(),
            findings: vec![linfonodo],
        }],
    };

    Catalog::new(vec![
        breast_side("mama-direita", "Mama Direita"),
        breast_side("mama-esquerda", "Mama Esquerda"),
        axilas,
    ])
}
