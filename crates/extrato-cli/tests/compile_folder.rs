//! End-to-end test of the folder-compile commands.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const FUND_DUMP: &str = "\
BB RF DIVIDA EXT MIL - CNPJ: 03.537.373/0001-20
SALDO ANTERIOR 11.363,79
APLICACOES (+) 0,00
RESGATES (-) 0,00
RENDIMENTO BRUTO (+) 1,15
IMPOSTO DE RENDA (-) 0,05
IOF (-) 0,00
RENDIMENTO LIQUIDO 1,10
EM 31/05/2016 SALDO ATUAL = 11.364,89
";

#[test]
fn funds_command_compiles_a_folder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("extrato-2016-05.txt"), FUND_DUMP).unwrap();

    let mut cmd = Command::cargo_bin("extrato").unwrap();
    cmd.arg("funds").arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Fundo"))
        .stdout(predicate::str::contains("RF DIVIDA EXT MIL"))
        .stdout(predicate::str::contains("11364.89"));
}

#[test]
fn funds_command_fails_on_incomplete_dump() {
    let truncated = FUND_DUMP.replace("IOF (-) 0,00\n", "");
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("extrato-2016-05.txt"), truncated).unwrap();

    let mut cmd = Command::cargo_bin("extrato").unwrap();
    cmd.arg("funds").arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("IOF"));
}

#[test]
fn ledger_command_drops_balance_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "\
Data,Origem,Historico,Data balancete,Documento,Valor,
02/05/2016,Agencia 1234-5,Pagamento conta luz,02/05/2016,101,\"-120,50\",
06/05/2016,Agencia 1234-5,S A L D O,06/05/2016,0,\"993,90\",
";
    fs::write(dir.path().join("2016-05.csv"), csv).unwrap();

    let mut cmd = Command::cargo_bin("extrato").unwrap();
    cmd.arg("ledger").arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pagamento conta luz"))
        .stdout(predicate::str::contains("s a l d o").not());
}
