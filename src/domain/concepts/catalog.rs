use super::entities::{Concept, ConceptSection, ConceptSummary};

const ROLEPLAY: Concept = Concept {
  slug: "roleplay",
  title: "¿Qué es el Roleplay?",
  summary: "La interpretación de un personaje dentro de un mundo virtual.",
  sections: &[
    ConceptSection {
      heading: "¿Qué es el Roleplay?",
      paragraphs: &[
        "El roleplay es la interpretación de un personaje dentro de un mundo virtual. En Costa Roleplay, no juegas como tú mismo, sino como un personaje que creas con su propia historia, personalidad, objetivos y características.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Aspectos clave",
      paragraphs: &[],
      items: &[
        "Interpretación: Debes actuar como tu personaje en todo momento dentro del servidor",
        "Inmersión: Crea una historia coherente y real para tu personaje",
        "Interacción: Comunícate y actúa basándote en lo que tu personaje sentiría y haría",
        "Realismo: Tus acciones deben tener sentido en el contexto del mundo de rol",
      ],
    },
    ConceptSection {
      heading: "Objetivos del Roleplay",
      paragraphs: &[],
      items: &[
        "Crear historias emocionantes y memorables",
        "Fomentar la creatividad y la imaginación",
        "Construir una comunidad de jugadores conectados",
        "Disfrutar de una experiencia inmersiva única",
      ],
    },
  ],
};

const IC_OOC: Concept = Concept {
  slug: "ic-ooc",
  title: "IC vs OOC",
  summary: "La separación entre lo que vive tu personaje y lo que hablas como jugador.",
  sections: &[
    ConceptSection {
      heading: "IC vs OOC: Fundamentos Esenciales",
      paragraphs: &[
        "La separación entre IC (In Character) y OOC (Out Of Character) es uno de los conceptos más importantes en el roleplay.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "IC (In Character)",
      paragraphs: &[],
      items: &[
        "Todo lo que tu personaje dice, hace y experimenta en el mundo de rol",
        "La perspectiva y conocimiento de tu personaje",
        "Acciones y diálogos basados en la historia de tu personaje",
        "Lo que sucede dentro del universo de juego",
      ],
    },
    ConceptSection {
      heading: "OOC (Out Of Character)",
      paragraphs: &[],
      items: &[
        "Comunicación entre jugadores (no entre personajes)",
        "Problemas técnicos, consultas sobre reglas, organización",
        "Información que tu personaje NO conoce en el juego",
        "No se usa para hacer preguntas sobre algo IC",
      ],
    },
    ConceptSection {
      heading: "Ejemplo",
      paragraphs: &[],
      items: &[
        "IC: ¿Hoy vamos a hacer carreras?",
        "OOC: ((¿A qué hora es el evento? Me desconecté))",
      ],
    },
  ],
};

const ME_DO: Concept = Concept {
  slug: "me-y-do",
  title: "Uso del /me y /do",
  summary: "Cómo describir acciones de tu personaje y el entorno que lo rodea.",
  sections: &[
    ConceptSection {
      heading: "ME y DO: Qué es y cómo debo usarlo",
      paragraphs: &[
        "El /me se usa para describir una acción de tu personaje. Por ejemplo, para ponerte el cinturón en tu vehículo escribirías /me agarraría el cinturón y lo abrocharía alrededor de su pecho.",
        "El /do se usa para describir una situación o entorno en el que se encuentra tu personaje. Si estás en un lugar oscuro y quieres describirlo a los demás jugadores escribirías /do El lugar es oscuro y no se ve nada.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Cosas que debes evitar al usarlos",
      paragraphs: &[
        "Debes evitar usar /me para acciones imposibles o para controlar lo que otros jugadores hacen, y también evitar escribir pensamientos que nadie puede ver. Con /do, evita describir cosas que no son visibles, inventar resultados que afectan a otros sin dejarles responder o usarlo para acciones que van en /me. En ambos casos, evita exagerar, trolear o escribir cosas que no aporten al rol.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Ejemplos de /me",
      paragraphs: &[],
      items: &[
        "/me se lleva la mano a la frente después del golpe y parpadea un par de veces tratando de entender qué pasó.",
        "/me mete la mano al bolsillo temblando un poco y saca el celular como puede.",
        "/me llevaría su diestra a su cintura, levantaría la camisa y sacaría el arma.",
        "/me tira del cinturón y lo engancha, esta vez asegurándose de que haga \"clic\".",
      ],
    },
    ConceptSection {
      heading: "Ejemplos de /do",
      paragraphs: &[],
      items: &[
        "/do El carro habría quedado con el capó doblado y un humito sospechoso saliendo.",
        "/do El celular estaría encendido, pero con varias notificaciones de \"sin señal\".",
        "/do El arma quedaría visible en su mano, pero se notaría que aún está nervioso por el choque.",
        "/do El cinturón quedaría bien ajustado, aunque un poco torcido por el golpe.",
      ],
    },
  ],
};

const ENTORNOS: Concept = Concept {
  slug: "entornos",
  title: "Entornos en Rol",
  summary: "Informar a los jugadores cercanos de lo que ocurre en una escena.",
  sections: &[
    ConceptSection {
      heading: "Uso de Entornos",
      paragraphs: &[
        "El comando /entorno se usa para informar a los demás jugadores, y a los jugadores cercanos, de lo que está ocurriendo en una escena.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Características de los Entornos",
      paragraphs: &[
        "Un /entorno debe incluir de forma obligatoria cuántas personas participan, qué vehículos están involucrados, qué armas son visibles o se escuchan, hacia dónde se dirigen y cómo va vestida cada persona. Toda esta información debe ser general, visible y entendible para cualquier jugador cercano, sin inventar datos imposibles ni usar detalles que solo el personaje sabría.",
        "Los entornos casi siempre se usan en roles de carteles ilegales o en roles del gobierno.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Situaciones para usar los entornos",
      paragraphs: &[],
      items: &[
        "Robos",
        "Persecuciones",
        "Tiroteos",
        "Grupo de personas actuando de forma sospechosa",
        "Presencia policial",
        "Vehículos involucrados en actividades ilegales",
      ],
    },
  ],
};

const SANCIONES: Concept = Concept {
  slug: "conceptos-para-sanciones",
  title: "Conceptos Para Sanciones",
  summary: "Conceptos de rol por los que te pueden sancionar y su tiempo de sanción.",
  sections: &[
    ConceptSection {
      heading: "Conceptos Para Sanciones",
      paragraphs: &[
        "Aquí podrás ver todos los conceptos de rol por los que te podrán sancionar dentro del servidor.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Conceptos de rol básico",
      paragraphs: &[],
      items: &[
        "DM (DeathMatch): Matar a un usuario sin razón alguna",
        "MG (Metagaming): Usar de manera directa información que tu personaje no debería saber, obtenida fuera del juego",
        "PG (PowerGaming): Hacer algo que en la vida real no harías",
        "RK (RevengeKill): Matar por venganza después de haber muerto en un rol",
        "TK (TeamKill): Matar a miembros de tu facción",
        "CK (CarKill): Matar o atropellar con un auto",
        "HK (HelicopterKill): Matar con las hélices de un helicóptero",
        "NA (NoobAbuser): Abusar de un novato",
        "BH (Bunny Hop): Correr y saltar para llegar a un lugar sin que el PJ se canse",
        "ZZ (ZigZag): Correr en zigzag para evitar que te disparen",
        "CJ (CarJacked): Robar un auto sin rol alguno",
        "BPC (BadParkingCar): Estacionar mal un auto, por ejemplo en medio de la carretera",
        "BD (BadDriving): Manejar mal, por el carril contrario o por la acera",
        "DB (DriveBy): Matar o herir con un arma desde el auto",
        "SK (SpawnKill): Matar donde aparece el PJ",
        "IHQ (InvasionHeadQuarters): Invadir una facción con menos de 4 miembros",
        "NRE: No rolear entorno",
        "NRA: No rolear arma",
        "NRH: No rolear herida",
        "NRC: No rolear choque",
        "TTO: Matar a un PJ que está agonizando",
        "PG2 (Evasión de rol): Evadir rol cortando por /b o cambiándose de PJ",
        "AVP (AFK en vía pública): Estar AFK en una vía pública dañando el rol de la gente",
        "MUD: Mal uso de /duda",
        "NRR2: No rolear reparación",
        "MUDVT: Mal usar vehículos de trabajo",
        "PI: Provocación innecesaria",
      ],
    },
    ConceptSection {
      heading: "Conceptos de rol avanzado",
      paragraphs: &[],
      items: &[
        "AIOOC: Insultar a un miembro del staff de manera OOC",
        "AA2 (Animación Abuse): Abusar de una animación",
        "AHQ: Abusar de tu facción, por ejemplo metiéndote a tu HQ escapando de la policía",
        "AR (Anti Rol): No aceptar un rol",
        "CA (Command Abuser): Abusar de un comando del servidor",
        "EK (Evadir Kill): Desconectarse o usar un comando que te beneficie",
        "FK (Free Kill): Matar a muchas personas sin razón",
        "FA (Facción Abuse): Abusar de una facción",
        "ICN (Incumplimiento de normativa): Incumplir la normativa del servidor",
        "IOOC: Insultar a alguien de manera OOC",
        "IDS: Interferir en la dinámica del servidor",
        "LA2 (Líder Abuser): Abusar del líder de una facción",
        "LA (Lag Abuser): Abusar del lag del servidor",
        "MA (Mal Anuncio): Mal usar /sms 444 o anuncios",
        "MG2: Uso sutil e indirecto de información obtenida fuera del juego",
        "MK (Meta Kill): Matar a una persona IC por motivos OOC",
        "RSL: Rambo sin licencia",
        "TA (Tazer Abuser): Abusar del /tazer",
        "NVVPJ: No valorar la vida de tu personaje",
      ],
    },
    ConceptSection {
      heading: "Tiempo de sanción",
      paragraphs: &[],
      items: &[
        "DM: 60 minutos",
        "MG: 45 minutos",
        "PG: 40 minutos",
        "RK: 70 minutos",
        "TK: 60 minutos",
        "CK: 50 minutos",
        "HK: 60 minutos",
        "NA: 50 minutos",
        "AA (AdminAbuser): 90 minutos",
        "ZZ: 25 minutos",
        "BH: 20 minutos",
        "CJ: 35 minutos",
        "BPC: 15 minutos",
        "BD: 20 minutos",
        "DB: 60 minutos",
        "SK: 70 minutos",
        "IHQ: 80 minutos",
        "NRE: 25 minutos",
        "NRA: 30 minutos",
        "NRH: 30 minutos",
        "NRC: 25 minutos",
        "IOOC: 40 minutos",
        "AIOOC: 60 minutos",
        "ICN: 30 minutos",
        "LA2: 70 minutos",
        "AHQ: 50 minutos",
        "CA: 45 minutos",
        "AA2: 35 minutos",
        "LA: 40 minutos",
        "TTO: 50 minutos",
        "PG2: 60 minutos",
        "AR: 40 minutos",
        "MG2: 35 minutos",
        "EK: 60 minutos",
        "FK: 70 minutos",
        "HQ (mal uso): 30 minutos",
        "AVP: 10 minutos",
        "MA: 20 minutos",
      ],
    },
  ],
};

const BANEOS: Concept = Concept {
  slug: "conceptos-para-baneos",
  title: "Conceptos Para Baneos",
  summary: "Faltas que conllevan un baneo y su duración.",
  sections: &[
    ConceptSection {
      heading: "Conceptos Para Baneos",
      paragraphs: &[
        "Cuando eres baneado se te bloquea el acceso al servidor por una cantidad de tiempo según lo que hayas hecho. Si superas los 10 baneos puedes ser baneado por un mes o permanentemente sin posibilidad de apelación.",
      ],
      items: &[],
    },
    ConceptSection {
      heading: "Baneos y tiempo de baneo",
      paragraphs: &[],
      items: &[
        "Acoso / roles sensibles: hombres 192 horas (8 días), mujeres 360 horas (15 días)",
        "Discriminación / xenofobia: 48 horas (2 días)",
        "Insulto masivo a miembros del equipo administrativo: 48 horas",
        "Insulto máximo al servidor: baneo permanente",
        "Venta de objetos IC con dinero OOC: baneo permanente",
        "Abusar de un bug del servidor y no notificarlo: baneo permanente",
        "Abusar de un bug mínimo del servidor: 120 horas (5 días)",
        "Corrupción en la PD sin autorización: 96 horas (4 días)",
        "No pagar algún servicio público (mecánicos, médicos): 24 horas",
        "IDS (Interferir en la dinámica del servidor): 24 horas (1 día)",
        "ER (Evadir rol): 96 horas (4 días)",
        "Acumulación de 5 sanciones IC: 48 horas (2 días)",
        "Acumulación de 7 sanciones IC: 72 horas (3 días)",
        "Acumulación de 10 sanciones IC: 120 horas y eliminación del 50% del dinero",
        "Preferir sanción para no seguir el rol: 48 horas (2 días)",
        "Vender armas de la PD: 24 horas (1 día)",
        "Bug de mira (Ghostpic): 168 horas (1 semana)",
        "FA (Facción Abuser): 168 horas (1 semana) o permanente",
      ],
    },
  ],
};

static CONCEPTS: &[Concept] = &[ROLEPLAY, IC_OOC, ME_DO, ENTORNOS, SANCIONES, BANEOS];

/// Read-only access to the rules reference
#[derive(Debug, Clone, Copy, Default)]
pub struct ConceptCatalog;

impl ConceptCatalog {
  pub fn new() -> Self {
    Self
  }

  /// All concepts in display order
  pub fn all(&self) -> &'static [Concept] {
    CONCEPTS
  }

  pub fn summaries(&self) -> Vec<ConceptSummary> {
    CONCEPTS.iter().map(Concept::summary).collect()
  }

  pub fn find(&self, slug: &str) -> Option<&'static Concept> {
    CONCEPTS.iter().find(|concept| concept.slug == slug)
  }
}
