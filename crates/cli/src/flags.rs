use clap::ValueEnum;
use teamnet_graph::EdgeKind;
use teamnet_protocol::PhysicsModel;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum EdgeFlag {
    Department,
    Role,
    BirthYear,
    Cohort,
    Spinoff,
    Gender,
    JoinYear,
    Personality,
    BloodType,
}

impl EdgeFlag {
    pub(crate) const fn as_domain(self) -> EdgeKind {
        match self {
            EdgeFlag::Department => EdgeKind::Department,
            EdgeFlag::Role => EdgeKind::Role,
            EdgeFlag::BirthYear => EdgeKind::BirthYear,
            EdgeFlag::Cohort => EdgeKind::Cohort,
            EdgeFlag::Spinoff => EdgeKind::Spinoff,
            EdgeFlag::Gender => EdgeKind::Gender,
            EdgeFlag::JoinYear => EdgeKind::JoinYear,
            EdgeFlag::Personality => EdgeKind::Personality,
            EdgeFlag::BloodType => EdgeKind::BloodType,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum EnergyFlag {
    E,
    I,
}

impl EnergyFlag {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            EnergyFlag::E => "E",
            EnergyFlag::I => "I",
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum DecisionFlag {
    T,
    F,
}

impl DecisionFlag {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            DecisionFlag::T => "T",
            DecisionFlag::F => "F",
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum PhysicsFlag {
    BarnesHut,
    ForceAtlas2Based,
    Repulsion,
}

impl PhysicsFlag {
    pub(crate) const fn as_domain(self) -> PhysicsModel {
        match self {
            PhysicsFlag::BarnesHut => PhysicsModel::BarnesHut,
            PhysicsFlag::ForceAtlas2Based => PhysicsModel::ForceAtlas2Based,
            PhysicsFlag::Repulsion => PhysicsModel::Repulsion,
        }
    }
}
