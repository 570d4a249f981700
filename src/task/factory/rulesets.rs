use crate::task::{ContestNationality, TaskFactoryType, TaskPointFactoryType};

use TaskPointFactoryType::*;

/// Structural rules a ruleset imposes on the whole task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFactoryConstraints {
    /// Start and finish at the same waypoint
    pub is_closed: bool,
    /// No waypoint used twice, except start equal to finish
    pub is_unique: bool,
    /// Finish height rules follow the FAI sporting code
    pub fai_finish: bool,
    /// All turnpoints share one type
    pub homogeneous_tps: bool,
    pub is_scored: bool,
    pub min_points: usize,
    pub max_points: usize,
}

impl TaskFactoryConstraints {
    pub fn is_fixed_size(&self) -> bool {
        self.min_points == self.max_points
    }
}

/// Zone sizes that override any requested size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSizes {
    pub start: f64,
    pub turnpoint: f64,
    pub finish: f64,
}

/// Data describing one ruleset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulesetDescriptor {
    pub kind: TaskFactoryType,
    /// `Some` for a national variant of the base ruleset
    pub nationality: Option<ContestNationality>,
    pub constraints: TaskFactoryConstraints,
    pub start_types: &'static [TaskPointFactoryType],
    pub intermediate_types: &'static [TaskPointFactoryType],
    pub finish_types: &'static [TaskPointFactoryType],
    /// Replacement for point types that are illegal under this ruleset
    pub mutations: &'static [(TaskPointFactoryType, TaskPointFactoryType)],
    pub fixed_sizes: Option<FixedSizes>,
    /// Enforce the FAI triangle leg proportions
    pub fai_triangle: bool,
}

impl RulesetDescriptor {
    pub fn mutation(&self, from: TaskPointFactoryType) -> Option<TaskPointFactoryType> {
        self.mutations.iter().find(|(old, _)| *old == from).map(|(_, new)| *new)
    }
}

const ALL_STARTS: &[TaskPointFactoryType] = &[StartLine, StartCylinder, StartSector, StartBga];
const ALL_FINISHES: &[TaskPointFactoryType] = &[FinishLine, FinishCylinder, FinishSector];
const FAI_STARTS: &[TaskPointFactoryType] = &[StartSector, StartLine];
const FAI_INTERMEDIATES: &[TaskPointFactoryType] = &[FaiSector, AstCylinder];
const FAI_FINISHES: &[TaskPointFactoryType] = &[FinishSector, FinishLine];

const FAI_MUTATIONS: &[(TaskPointFactoryType, TaskPointFactoryType)] = &[
    (StartCylinder, StartSector),
    (StartBga, StartSector),
    (KeyholeSector, FaiSector),
    (BgaFixedCourseSector, FaiSector),
    (BgaEnhancedOptionSector, FaiSector),
    (SymmetricQuadrant, FaiSector),
    (AatSegment, FaiSector),
    (AatAnnularSector, FaiSector),
    (AatKeyhole, FaiSector),
    (AatCylinder, AstCylinder),
    (MatCylinder, AstCylinder),
    (FinishCylinder, FinishSector),
];

const FAI_SIZES: Option<FixedSizes> = Some(FixedSizes {
    start: 1000.0,
    turnpoint: 500.0,
    finish: 1000.0,
});

const fn fai(min_points: usize, max_points: usize, is_closed: bool) -> TaskFactoryConstraints {
    TaskFactoryConstraints {
        is_closed,
        is_unique: true,
        fai_finish: true,
        homogeneous_tps: true,
        is_scored: true,
        min_points,
        max_points,
    }
}

const fn open(min_points: usize, max_points: usize) -> TaskFactoryConstraints {
    TaskFactoryConstraints {
        is_closed: false,
        is_unique: false,
        fai_finish: false,
        homogeneous_tps: false,
        is_scored: true,
        min_points,
        max_points,
    }
}

pub static RACING: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Racing,
    nationality: None,
    constraints: open(2, 30),
    start_types: ALL_STARTS,
    intermediate_types: &[
        AstCylinder,
        KeyholeSector,
        BgaFixedCourseSector,
        BgaEnhancedOptionSector,
        FaiSector,
        SymmetricQuadrant,
    ],
    finish_types: ALL_FINISHES,
    mutations: &[
        (AatKeyhole, KeyholeSector),
        (AatSegment, AstCylinder),
        (AatAnnularSector, AstCylinder),
        (AatCylinder, AstCylinder),
        (MatCylinder, AstCylinder),
    ],
    fixed_sizes: None,
    fai_triangle: false,
};

pub static RACING_US: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Racing,
    nationality: Some(ContestNationality::American),
    constraints: open(2, 30),
    start_types: &[StartCylinder],
    intermediate_types: &[MatCylinder],
    finish_types: &[FinishLine, FinishCylinder],
    mutations: &[
        (StartLine, StartCylinder),
        (StartSector, StartCylinder),
        (StartBga, StartCylinder),
        (FaiSector, MatCylinder),
        (KeyholeSector, MatCylinder),
        (BgaFixedCourseSector, MatCylinder),
        (BgaEnhancedOptionSector, MatCylinder),
        (AstCylinder, MatCylinder),
        (SymmetricQuadrant, MatCylinder),
        (AatCylinder, MatCylinder),
        (AatSegment, MatCylinder),
        (AatAnnularSector, MatCylinder),
        (AatKeyhole, MatCylinder),
        (FinishSector, FinishCylinder),
    ],
    fixed_sizes: None,
    fai_triangle: false,
};

pub static AAT: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Aat,
    nationality: None,
    constraints: open(2, 13),
    start_types: ALL_STARTS,
    intermediate_types: &[AatCylinder, AatSegment, AatAnnularSector, AatKeyhole],
    finish_types: ALL_FINISHES,
    mutations: &[
        (FaiSector, AatCylinder),
        (AstCylinder, AatCylinder),
        (MatCylinder, AatCylinder),
        (KeyholeSector, AatKeyhole),
        (BgaFixedCourseSector, AatSegment),
        (BgaEnhancedOptionSector, AatSegment),
        (SymmetricQuadrant, AatSegment),
    ],
    fixed_sizes: None,
    fai_triangle: false,
};

pub static AAT_US: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Aat,
    nationality: Some(ContestNationality::American),
    constraints: open(2, 13),
    start_types: &[StartCylinder],
    intermediate_types: &[AatCylinder],
    finish_types: &[FinishLine, FinishCylinder],
    mutations: &[
        (StartLine, StartCylinder),
        (StartSector, StartCylinder),
        (StartBga, StartCylinder),
        (FaiSector, AatCylinder),
        (KeyholeSector, AatCylinder),
        (BgaFixedCourseSector, AatCylinder),
        (BgaEnhancedOptionSector, AatCylinder),
        (AstCylinder, AatCylinder),
        (SymmetricQuadrant, AatCylinder),
        (MatCylinder, AatCylinder),
        (AatSegment, AatCylinder),
        (AatAnnularSector, AatCylinder),
        (AatKeyhole, AatCylinder),
        (FinishSector, FinishCylinder),
    ],
    fixed_sizes: None,
    fai_triangle: false,
};

const FAI_BASE: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::FaiGeneral,
    nationality: None,
    constraints: fai(2, 13, false),
    start_types: FAI_STARTS,
    intermediate_types: FAI_INTERMEDIATES,
    finish_types: FAI_FINISHES,
    mutations: FAI_MUTATIONS,
    fixed_sizes: FAI_SIZES,
    fai_triangle: false,
};

pub static FAI_GENERAL: RulesetDescriptor = RulesetDescriptor {
    constraints: TaskFactoryConstraints {
        is_unique: false,
        fai_finish: false,
        ..fai(2, 13, false)
    },
    ..FAI_BASE
};

pub static FAI_TRIANGLE: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::FaiTriangle,
    constraints: fai(4, 4, true),
    fai_triangle: true,
    ..FAI_BASE
};

pub static FAI_OUT_AND_RETURN: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::FaiOutAndReturn,
    constraints: fai(3, 3, true),
    ..FAI_BASE
};

pub static FAI_GOAL: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::FaiGoal,
    constraints: fai(2, 2, false),
    ..FAI_BASE
};

pub static MAT: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Mat,
    nationality: None,
    constraints: open(2, 13),
    start_types: &[StartCylinder, StartLine, StartSector],
    intermediate_types: &[MatCylinder],
    finish_types: &[FinishLine, FinishCylinder],
    mutations: &[
        (StartBga, StartCylinder),
        (FaiSector, MatCylinder),
        (KeyholeSector, MatCylinder),
        (BgaFixedCourseSector, MatCylinder),
        (BgaEnhancedOptionSector, MatCylinder),
        (AstCylinder, MatCylinder),
        (SymmetricQuadrant, MatCylinder),
        (AatCylinder, MatCylinder),
        (AatSegment, MatCylinder),
        (AatAnnularSector, MatCylinder),
        (AatKeyhole, MatCylinder),
        (FinishSector, FinishCylinder),
    ],
    fixed_sizes: None,
    fai_triangle: false,
};

pub static MIXED: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Mixed,
    nationality: None,
    constraints: open(2, 13),
    start_types: ALL_STARTS,
    intermediate_types: &[
        AstCylinder,
        AatCylinder,
        AatSegment,
        AatAnnularSector,
        AatKeyhole,
        MatCylinder,
        FaiSector,
        KeyholeSector,
        BgaFixedCourseSector,
        BgaEnhancedOptionSector,
        SymmetricQuadrant,
    ],
    finish_types: ALL_FINISHES,
    mutations: &[],
    fixed_sizes: None,
    fai_triangle: false,
};

pub static TOURING: RulesetDescriptor = RulesetDescriptor {
    kind: TaskFactoryType::Touring,
    nationality: None,
    constraints: TaskFactoryConstraints {
        is_scored: false,
        ..open(2, 13)
    },
    start_types: &[StartCylinder],
    intermediate_types: &[FaiSector, AstCylinder],
    finish_types: &[FinishCylinder],
    mutations: &[],
    fixed_sizes: None,
    fai_triangle: false,
};

/// Descriptor for `kind` under `nationality`, falling back to the base
/// ruleset where no national variant exists
pub fn descriptor(kind: TaskFactoryType, nationality: ContestNationality) -> &'static RulesetDescriptor {
    let us = nationality == ContestNationality::American;
    match kind {
        TaskFactoryType::Racing if us => &RACING_US,
        TaskFactoryType::Racing => &RACING,
        TaskFactoryType::Aat if us => &AAT_US,
        TaskFactoryType::Aat => &AAT,
        TaskFactoryType::FaiGeneral => &FAI_GENERAL,
        TaskFactoryType::FaiTriangle => &FAI_TRIANGLE,
        TaskFactoryType::FaiOutAndReturn => &FAI_OUT_AND_RETURN,
        TaskFactoryType::FaiGoal => &FAI_GOAL,
        TaskFactoryType::Mat => &MAT,
        TaskFactoryType::Mixed => &MIXED,
        TaskFactoryType::Touring => &TOURING,
    }
}
