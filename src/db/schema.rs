//! Table definitions. Timestamps are stored as text in a single UTC format
//! so they compare correctly as strings.

pub(super) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS condominios (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    nome       TEXT NOT NULL,
    endereco   TEXT,
    cnpj       TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS blocos (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    nome          TEXT NOT NULL,
    condominio_id INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS unidades (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    numero   TEXT NOT NULL,
    andar    INTEGER,
    bloco_id INTEGER NOT NULL REFERENCES blocos(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS usuarios (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    nome          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    senha         TEXT NOT NULL,
    role          TEXT NOT NULL,
    telefone      TEXT,
    condominio_id INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE,
    unidade_id    INTEGER REFERENCES unidades(id) ON DELETE SET NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS veiculos (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    placa      TEXT NOT NULL,
    modelo     TEXT,
    cor        TEXT,
    morador_id INTEGER NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS pets (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    nome       TEXT NOT NULL,
    tipo       TEXT,
    raca       TEXT,
    morador_id INTEGER NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS chamados (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo         TEXT NOT NULL,
    descricao      TEXT NOT NULL,
    tipo           TEXT NOT NULL,
    status         TEXT NOT NULL,
    prioridade     TEXT NOT NULL,
    local          TEXT,
    criador_id     INTEGER NOT NULL REFERENCES usuarios(id),
    responsavel_id INTEGER REFERENCES usuarios(id) ON DELETE SET NULL,
    condominio_id  INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS chamados_condominio_status ON chamados (condominio_id, status);

CREATE TABLE IF NOT EXISTS comentarios (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    chamado_id INTEGER NOT NULL REFERENCES chamados(id) ON DELETE CASCADE,
    autor_id   INTEGER NOT NULL REFERENCES usuarios(id),
    texto      TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS chamado_historico (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    chamado_id INTEGER NOT NULL REFERENCES chamados(id) ON DELETE CASCADE,
    tipo       TEXT NOT NULL,
    descricao  TEXT NOT NULL,
    autor_id   INTEGER REFERENCES usuarios(id),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS eventos (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo        TEXT NOT NULL,
    descricao     TEXT NOT NULL,
    data          TEXT NOT NULL,
    hora          TEXT,
    local         TEXT,
    responsavel   TEXT,
    tipo          TEXT NOT NULL,
    status        TEXT NOT NULL,
    condominio_id INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE,
    created_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS eventos_condominio_data ON eventos (condominio_id, data);

CREATE TABLE IF NOT EXISTS prestadores (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    nome                TEXT NOT NULL,
    servico             TEXT NOT NULL,
    telefone            TEXT,
    email               TEXT,
    contrato_inicio     TEXT,
    contrato_vencimento TEXT,
    condominio_id       INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE,
    created_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS espacos (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    nome          TEXT NOT NULL,
    descricao     TEXT,
    capacidade    INTEGER,
    valor_reserva REAL NOT NULL DEFAULT 0,
    regras        TEXT,
    condominio_id INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS reservas (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    espaco_id   INTEGER NOT NULL REFERENCES espacos(id) ON DELETE CASCADE,
    morador_id  INTEGER NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE,
    data        TEXT NOT NULL,
    status      TEXT NOT NULL,
    observacoes TEXT,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS reservas_espaco_data ON reservas (espaco_id, data);

CREATE TABLE IF NOT EXISTS encomendas (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    descricao        TEXT NOT NULL,
    remetente        TEXT,
    status           TEXT NOT NULL,
    destinatario_id  INTEGER NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE,
    data_recebimento TEXT NOT NULL,
    data_entrega     TEXT
);

CREATE TABLE IF NOT EXISTS avisos (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo          TEXT NOT NULL,
    conteudo        TEXT NOT NULL,
    prioridade      TEXT NOT NULL,
    data_expiracao  TEXT,
    condominio_id   INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS documentos (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    nome          TEXT NOT NULL,
    url           TEXT NOT NULL,
    categoria     TEXT NOT NULL,
    visibilidade  TEXT NOT NULL,
    observacoes   TEXT,
    condominio_id INTEGER NOT NULL REFERENCES condominios(id) ON DELETE CASCADE,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";
