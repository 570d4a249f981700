use crate::task::PointKind;
use crate::zone::ZoneShape;
use serde::{Deserialize, Serialize};

/// A task point role combined with the shape of its observation zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPointFactoryType {
    StartSector,
    StartLine,
    StartCylinder,
    StartBga,
    FaiSector,
    KeyholeSector,
    BgaFixedCourseSector,
    BgaEnhancedOptionSector,
    AstCylinder,
    SymmetricQuadrant,
    AatCylinder,
    AatSegment,
    AatAnnularSector,
    AatKeyhole,
    MatCylinder,
    FinishSector,
    FinishLine,
    FinishCylinder,
}

impl TaskPointFactoryType {
    pub const ALL: [TaskPointFactoryType; 18] = [
        Self::StartSector,
        Self::StartLine,
        Self::StartCylinder,
        Self::StartBga,
        Self::FaiSector,
        Self::KeyholeSector,
        Self::BgaFixedCourseSector,
        Self::BgaEnhancedOptionSector,
        Self::AstCylinder,
        Self::SymmetricQuadrant,
        Self::AatCylinder,
        Self::AatSegment,
        Self::AatAnnularSector,
        Self::AatKeyhole,
        Self::MatCylinder,
        Self::FinishSector,
        Self::FinishLine,
        Self::FinishCylinder,
    ];

    /// The point role a point of this type is created with
    pub fn kind(self) -> PointKind {
        use TaskPointFactoryType::*;

        match self {
            StartSector | StartLine | StartCylinder | StartBga => PointKind::Start,
            FaiSector | KeyholeSector | BgaFixedCourseSector | BgaEnhancedOptionSector | AstCylinder
            | SymmetricQuadrant => PointKind::Turnpoint,
            AatCylinder | AatSegment | AatAnnularSector | AatKeyhole | MatCylinder => PointKind::Area,
            FinishSector | FinishLine | FinishCylinder => PointKind::Finish,
        }
    }

    /// The type of an existing point with role `kind` and a zone of `shape`
    pub fn classify(kind: PointKind, shape: ZoneShape) -> Self {
        match kind {
            PointKind::Start => match shape {
                ZoneShape::FaiSector => Self::StartSector,
                ZoneShape::Line => Self::StartLine,
                ZoneShape::BgaStart => Self::StartBga,
                _ => Self::StartCylinder,
            },
            PointKind::Turnpoint => match shape {
                ZoneShape::FaiSector => Self::FaiSector,
                ZoneShape::Keyhole => Self::KeyholeSector,
                ZoneShape::BgaFixedCourse => Self::BgaFixedCourseSector,
                ZoneShape::BgaEnhancedOption => Self::BgaEnhancedOptionSector,
                ZoneShape::SymmetricQuadrant => Self::SymmetricQuadrant,
                _ => Self::AstCylinder,
            },
            PointKind::Area => match shape {
                ZoneShape::Cylinder => Self::AatCylinder,
                ZoneShape::MatCylinder => Self::MatCylinder,
                ZoneShape::AnnularSector => Self::AatAnnularSector,
                ZoneShape::Keyhole => Self::AatKeyhole,
                _ => Self::AatSegment,
            },
            PointKind::Finish => match shape {
                ZoneShape::FaiSector | ZoneShape::BgaStart => Self::FinishSector,
                ZoneShape::Line => Self::FinishLine,
                _ => Self::FinishCylinder,
            },
        }
    }
}

/// Competition ruleset a task is planned under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFactoryType {
    #[default]
    Racing,
    FaiGeneral,
    FaiTriangle,
    FaiOutAndReturn,
    FaiGoal,
    Aat,
    Mat,
    Mixed,
    Touring,
}

impl TaskFactoryType {
    pub const ALL: [TaskFactoryType; 9] = [
        Self::Racing,
        Self::FaiGeneral,
        Self::FaiTriangle,
        Self::FaiOutAndReturn,
        Self::FaiGoal,
        Self::Aat,
        Self::Mat,
        Self::Mixed,
        Self::Touring,
    ];

    pub fn is_fai(self) -> bool {
        matches!(
            self,
            Self::FaiGeneral | Self::FaiTriangle | Self::FaiOutAndReturn | Self::FaiGoal
        )
    }
}
