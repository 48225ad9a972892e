//! Protocol enumerations carried in the common PDU header.

use std::fmt;

/// Protocol version byte (header offset 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProtocolVersion {
    Other = 0,
    Dis1_0 = 1,
    Ieee1278_1993 = 2,
    Dis2_0ThirdDraft = 3,
    Dis2_0FourthDraft = 4,
    Ieee1278_1_1995 = 5,
    Ieee1278_1a_1998 = 6,
}

impl ProtocolVersion {
    /// The version this codec's catalog encodes.
    pub const CURRENT: Self = Self::Ieee1278_1a_1998;

    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0 => Self::Other,
            1 => Self::Dis1_0,
            2 => Self::Ieee1278_1993,
            3 => Self::Dis2_0ThirdDraft,
            4 => Self::Dis2_0FourthDraft,
            5 => Self::Ieee1278_1_1995,
            6 => Self::Ieee1278_1a_1998,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Protocol family byte (header offset 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProtocolFamily {
    Other = 0,
    EntityInformation = 1,
    Warfare = 2,
    Logistics = 3,
    RadioCommunications = 4,
    SimulationManagement = 5,
    DistributedEmissionRegeneration = 6,
    EntityManagement = 7,
    Minefield = 8,
    SyntheticEnvironment = 9,
    SimulationManagementWithReliability = 10,
    LiveEntity = 11,
    NonRealTime = 12,
}

impl ProtocolFamily {
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0 => Self::Other,
            1 => Self::EntityInformation,
            2 => Self::Warfare,
            3 => Self::Logistics,
            4 => Self::RadioCommunications,
            5 => Self::SimulationManagement,
            6 => Self::DistributedEmissionRegeneration,
            7 => Self::EntityManagement,
            8 => Self::Minefield,
            9 => Self::SyntheticEnvironment,
            10 => Self::SimulationManagementWithReliability,
            11 => Self::LiveEntity,
            12 => Self::NonRealTime,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

macro_rules! pdu_types {
    ($($variant:ident = $raw:literal => $family:ident, $name:literal;)*) => {
        /// PDU type discriminant (header offset 2).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum PduType {
            $($variant = $raw,)*
        }

        impl PduType {
            /// Every defined PDU type in discriminant order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Converts a raw header byte into a known PDU type.
            #[must_use]
            pub const fn from_raw(raw: u8) -> Option<Self> {
                match raw {
                    $($raw => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the protocol family this PDU type belongs to.
            #[must_use]
            pub const fn family(self) -> ProtocolFamily {
                match self {
                    $(Self::$variant => ProtocolFamily::$family,)*
                }
            }

            /// Returns the conventional PDU name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

pdu_types! {
    Other = 0 => Other, "Other";
    EntityState = 1 => EntityInformation, "EntityState";
    Fire = 2 => Warfare, "Fire";
    Detonation = 3 => Warfare, "Detonation";
    Collision = 4 => EntityInformation, "Collision";
    ServiceRequest = 5 => Logistics, "ServiceRequest";
    ResupplyOffer = 6 => Logistics, "ResupplyOffer";
    ResupplyReceived = 7 => Logistics, "ResupplyReceived";
    ResupplyCancel = 8 => Logistics, "ResupplyCancel";
    RepairComplete = 9 => Logistics, "RepairComplete";
    RepairResponse = 10 => Logistics, "RepairResponse";
    CreateEntity = 11 => SimulationManagement, "CreateEntity";
    RemoveEntity = 12 => SimulationManagement, "RemoveEntity";
    StartResume = 13 => SimulationManagement, "StartResume";
    StopFreeze = 14 => SimulationManagement, "StopFreeze";
    Acknowledge = 15 => SimulationManagement, "Acknowledge";
    ActionRequest = 16 => SimulationManagement, "ActionRequest";
    ActionResponse = 17 => SimulationManagement, "ActionResponse";
    DataQuery = 18 => SimulationManagement, "DataQuery";
    SetData = 19 => SimulationManagement, "SetData";
    Data = 20 => SimulationManagement, "Data";
    EventReport = 21 => SimulationManagement, "EventReport";
    Comment = 22 => SimulationManagement, "Comment";
    ElectromagneticEmission = 23 => DistributedEmissionRegeneration, "ElectromagneticEmission";
    Designator = 24 => DistributedEmissionRegeneration, "Designator";
    Transmitter = 25 => RadioCommunications, "Transmitter";
    Signal = 26 => RadioCommunications, "Signal";
    Receiver = 27 => RadioCommunications, "Receiver";
    IffAtcNavaids = 28 => DistributedEmissionRegeneration, "IffAtcNavaids";
    UnderwaterAcoustic = 29 => DistributedEmissionRegeneration, "UnderwaterAcoustic";
    SupplementalEmissionEntityState = 30 => DistributedEmissionRegeneration, "SupplementalEmissionEntityState";
    IntercomSignal = 31 => RadioCommunications, "IntercomSignal";
    IntercomControl = 32 => RadioCommunications, "IntercomControl";
    AggregateState = 33 => EntityManagement, "AggregateState";
    IsGroupOf = 34 => EntityManagement, "IsGroupOf";
    TransferControl = 35 => EntityManagement, "TransferControl";
    IsPartOf = 36 => EntityManagement, "IsPartOf";
    MinefieldState = 37 => Minefield, "MinefieldState";
    MinefieldQuery = 38 => Minefield, "MinefieldQuery";
    MinefieldData = 39 => Minefield, "MinefieldData";
    MinefieldResponseNak = 40 => Minefield, "MinefieldResponseNak";
    EnvironmentalProcess = 41 => SyntheticEnvironment, "EnvironmentalProcess";
    GriddedData = 42 => SyntheticEnvironment, "GriddedData";
    PointObjectState = 43 => SyntheticEnvironment, "PointObjectState";
    LinearObjectState = 44 => SyntheticEnvironment, "LinearObjectState";
    ArealObjectState = 45 => SyntheticEnvironment, "ArealObjectState";
    Tspi = 46 => LiveEntity, "Tspi";
    Appearance = 47 => LiveEntity, "Appearance";
    ArticulatedParts = 48 => LiveEntity, "ArticulatedParts";
    LeFire = 49 => LiveEntity, "LeFire";
    LeDetonation = 50 => LiveEntity, "LeDetonation";
    CreateEntityR = 51 => SimulationManagementWithReliability, "CreateEntityR";
    RemoveEntityR = 52 => SimulationManagementWithReliability, "RemoveEntityR";
    StartResumeR = 53 => SimulationManagementWithReliability, "StartResumeR";
    StopFreezeR = 54 => SimulationManagementWithReliability, "StopFreezeR";
    AcknowledgeR = 55 => SimulationManagementWithReliability, "AcknowledgeR";
    ActionRequestR = 56 => SimulationManagementWithReliability, "ActionRequestR";
    ActionResponseR = 57 => SimulationManagementWithReliability, "ActionResponseR";
    DataQueryR = 58 => SimulationManagementWithReliability, "DataQueryR";
    SetDataR = 59 => SimulationManagementWithReliability, "SetDataR";
    DataR = 60 => SimulationManagementWithReliability, "DataR";
    EventReportR = 61 => SimulationManagementWithReliability, "EventReportR";
    CommentR = 62 => SimulationManagementWithReliability, "CommentR";
    RecordR = 63 => SimulationManagementWithReliability, "RecordR";
    SetRecordR = 64 => SimulationManagementWithReliability, "SetRecordR";
    RecordQueryR = 65 => SimulationManagementWithReliability, "RecordQueryR";
    CollisionElastic = 66 => EntityInformation, "CollisionElastic";
    EntityStateUpdate = 67 => EntityInformation, "EntityStateUpdate";
}

impl PduType {
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PduType {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(raw)
    }
}

impl From<PduType> for u8 {
    fn from(pdu_type: PduType) -> Self {
        pdu_type.raw()
    }
}

impl fmt::Display for PduType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
